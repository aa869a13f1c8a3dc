//! 成绩册聚合的纯计算函数
//!
//! 全部基于当前数据即算即得，不落任何聚合结果。平均分缺席（None）
//! 与平均分为 0 是两种不同情形，调用方不得混同。

use std::collections::HashMap;

use crate::models::gradebook::responses::{LearnerRankingItem, ScoreRange};
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use crate::models::users::entities::User;

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 原始分算术平均；无数据时为 None
pub fn average(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        None
    } else {
        Some(round2(scores.iter().sum::<f64>() / scores.len() as f64))
    }
}

/// 已评分提交的原始分列表
pub fn graded_scores(submissions: &[Submission]) -> Vec<f64> {
    submissions
        .iter()
        .filter(|s| s.status == SubmissionStatus::Graded)
        .filter_map(|s| s.score)
        .collect()
}

/// 学员课程平均分：该学员在课程内已评分提交的均值
pub fn learner_course_average(submissions: &[Submission], learner_id: i64) -> Option<f64> {
    let scores: Vec<f64> = submissions
        .iter()
        .filter(|s| s.learner_id == learner_id && s.status == SubmissionStatus::Graded)
        .filter_map(|s| s.score)
        .collect();
    average(&scores)
}

/// 批改进度：已评分提交数 / 课程作业总数，百分比保留两位小数。
/// 课程没有作业时约定为 0.0。
pub fn course_progress(graded_count: usize, total_assignments: usize) -> f64 {
    if total_assignments == 0 {
        0.0
    } else {
        round2(graded_count as f64 / total_assignments as f64 * 100.0)
    }
}

/// 按状态统计提交数：(graded, pending, returned)
pub fn status_counts(submissions: &[Submission]) -> (i64, i64, i64) {
    let mut graded = 0;
    let mut pending = 0;
    let mut returned = 0;
    for submission in submissions {
        match submission.status {
            SubmissionStatus::Graded => graded += 1,
            SubmissionStatus::Pending => pending += 1,
            SubmissionStatus::Returned => returned += 1,
        }
    }
    (graded, pending, returned)
}

/// 未提交人数：已选课但没有任何提交记录的学员数
pub fn not_submitted_count(submissions: &[Submission], enrolled_count: i64) -> i64 {
    (enrolled_count - submissions.len() as i64).max(0)
}

/// 分数分布：按满分折算百分比分桶
pub fn score_distribution(scores: &[f64], max_score: f64) -> Vec<ScoreRange> {
    const BUCKETS: [(&str, f64, f64); 5] = [
        ("0-59", 0.0, 60.0),
        ("60-69", 60.0, 70.0),
        ("70-79", 70.0, 80.0),
        ("80-89", 80.0, 90.0),
        ("90-100", 90.0, 100.0),
    ];

    BUCKETS
        .iter()
        .map(|(label, low, high)| {
            let count = scores
                .iter()
                .map(|s| s / max_score * 100.0)
                .filter(|p| {
                    // 最后一桶右闭，满分落入 90-100
                    if *high >= 100.0 {
                        *p >= *low && *p <= *high
                    } else {
                        *p >= *low && *p < *high
                    }
                })
                .count() as i64;
            ScoreRange {
                range: label.to_string(),
                count,
            }
        })
        .collect()
}

/// 学员排名：平均分降序，同分保持取数顺序（稳定排序）
pub fn rank_learners(
    submissions: &[Submission],
    learner_order: &[i64],
    users: &HashMap<i64, User>,
) -> Vec<LearnerRankingItem> {
    let mut rankings: Vec<LearnerRankingItem> = learner_order
        .iter()
        .filter_map(|&learner_id| {
            let learner_submissions: Vec<&Submission> = submissions
                .iter()
                .filter(|s| s.learner_id == learner_id && s.status == SubmissionStatus::Graded)
                .collect();
            let scores: Vec<f64> = learner_submissions.iter().filter_map(|s| s.score).collect();

            average(&scores).map(|avg| {
                let (username, display_name) = users
                    .get(&learner_id)
                    .map(|u| (u.username.clone(), u.display_name.clone()))
                    .unwrap_or_default();
                LearnerRankingItem {
                    learner_id,
                    username,
                    display_name,
                    average_score: avg,
                    graded_count: scores.len() as i64,
                }
            })
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.average_score
            .partial_cmp(&a.average_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    rankings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn submission(learner_id: i64, status: SubmissionStatus, score: Option<f64>) -> Submission {
        Submission {
            id: learner_id * 100,
            assignment_id: 1,
            learner_id,
            content: Some("answer".to_string()),
            file_refs: None,
            github_url: None,
            status,
            score,
            feedback: None,
            attempt: 1,
            is_late: false,
            lock_version: 0,
            submitted_at: Utc::now(),
            graded_at: None,
        }
    }

    #[test]
    fn test_average_of_90_and_100_is_95() {
        assert_eq!(average(&[90.0, 100.0]), Some(95.0));
    }

    #[test]
    fn test_no_graded_data_yields_none_not_zero() {
        assert_eq!(average(&[]), None);
        assert_eq!(average(&[0.0]), Some(0.0));

        let submissions = vec![submission(1, SubmissionStatus::Pending, None)];
        assert_eq!(learner_course_average(&submissions, 1), None);
    }

    #[test]
    fn test_learner_average_ignores_other_learners() {
        let submissions = vec![
            submission(1, SubmissionStatus::Graded, Some(80.0)),
            submission(2, SubmissionStatus::Graded, Some(40.0)),
        ];
        assert_eq!(learner_course_average(&submissions, 1), Some(80.0));
    }

    #[test]
    fn test_resubmitted_work_drops_out_of_average() {
        // 重交把状态拉回 pending 并清空分数，平均分只剩其余已评分项
        let submissions = vec![
            submission(1, SubmissionStatus::Pending, None),
            submission(1, SubmissionStatus::Graded, Some(70.0)),
        ];
        assert_eq!(learner_course_average(&submissions, 1), Some(70.0));
    }

    #[test]
    fn test_course_progress_rounds_to_two_decimals() {
        // 3 个作业评了 2 个 → 66.67
        assert_eq!(course_progress(2, 3), 66.67);
        assert_eq!(course_progress(1, 3), 33.33);
        assert_eq!(course_progress(3, 3), 100.0);
    }

    #[test]
    fn test_course_progress_without_assignments_is_zero() {
        assert_eq!(course_progress(0, 0), 0.0);
    }

    #[test]
    fn test_status_counts() {
        let submissions = vec![
            submission(1, SubmissionStatus::Graded, Some(90.0)),
            submission(2, SubmissionStatus::Pending, None),
            submission(3, SubmissionStatus::Pending, None),
            submission(4, SubmissionStatus::Returned, None),
        ];
        assert_eq!(status_counts(&submissions), (1, 2, 1));
    }

    #[test]
    fn test_not_submitted_counts_enrolled_without_record() {
        let submissions = vec![
            submission(1, SubmissionStatus::Graded, Some(90.0)),
            submission(2, SubmissionStatus::Pending, None),
        ];
        assert_eq!(not_submitted_count(&submissions, 5), 3);
        assert_eq!(not_submitted_count(&submissions, 1), 0);
    }

    #[test]
    fn test_score_distribution_buckets() {
        let scores = vec![45.0, 65.0, 75.0, 85.0, 95.0, 100.0];
        let distribution = score_distribution(&scores, 100.0);
        let counts: Vec<i64> = distribution.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 1, 2]);
    }

    #[test]
    fn test_score_distribution_scales_by_max_score() {
        // 满分 50，得 45 分 → 90%
        let distribution = score_distribution(&[45.0], 50.0);
        assert_eq!(distribution[4].count, 1);
    }

    #[test]
    fn test_ranking_descending_and_stable_on_ties() {
        let submissions = vec![
            submission(1, SubmissionStatus::Graded, Some(80.0)),
            submission(2, SubmissionStatus::Graded, Some(95.0)),
            submission(3, SubmissionStatus::Graded, Some(80.0)),
            submission(4, SubmissionStatus::Pending, None),
        ];
        let users = HashMap::new();
        let rankings = rank_learners(&submissions, &[1, 2, 3, 4], &users);

        let order: Vec<i64> = rankings.iter().map(|r| r.learner_id).collect();
        // 学员 4 没有已评分提交，不参与排名；1 和 3 同分，保持取数顺序
        assert_eq!(order, vec![2, 1, 3]);
    }
}
