use serde::Serialize;
use ts_rs::TS;

/// 学员课程成绩摘要
///
/// average_score 为空表示该学员暂无已评分提交，与平均分为 0 是
/// 两种不同情形，前端需区分展示。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gradebook.ts")]
pub struct LearnerCourseSummary {
    pub learner_id: i64,
    pub course_id: i64,
    /// 已评分提交的原始分算术平均（不折算百分比）
    pub average_score: Option<f64>,
    pub graded_count: i64,
    pub pending_count: i64,
    pub returned_count: i64,
    /// 批改进度：已评分提交数 / 课程作业总数，百分比保留两位小数。
    /// 与 lesson_progress（课时完成进度）是独立概念，不可混用。
    pub course_progress: f64,
    /// 选课记录上的课时完成进度（0-100），由课时完成服务维护，此处只读
    pub lesson_progress: i32,
    pub enrolled_at: String,
    pub completed_at: Option<String>,
}

/// 分数区间分布（按满分折算百分比分桶）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gradebook.ts")]
pub struct ScoreRange {
    pub range: String,
    pub count: i64,
}

/// 单个作业的成绩统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gradebook.ts")]
pub struct AssignmentStats {
    pub assignment_id: i64,
    pub title: String,
    pub max_score: f64,
    /// 全体学员已评分提交的原始分平均；无已评分提交时为空
    pub average_score: Option<f64>,
    pub highest_score: Option<f64>,
    pub lowest_score: Option<f64>,
    pub graded: i64,
    pub pending: i64,
    pub returned: i64,
    /// 已选课但无任何提交记录的学员数
    pub not_submitted: i64,
    pub score_distribution: Vec<ScoreRange>,
}

/// 课程完成度统计中的单个作业条目
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gradebook.ts")]
pub struct AssignmentCompletionItem {
    pub assignment_id: i64,
    pub title: String,
    pub graded: i64,
    pub pending: i64,
    pub returned: i64,
    pub not_submitted: i64,
}

/// 课程完成度统计响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gradebook.ts")]
pub struct CourseCompletionStats {
    pub course_id: i64,
    pub enrolled_count: i64,
    pub assignments: Vec<AssignmentCompletionItem>,
}

/// 课程概览中的作业平均分条目
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gradebook.ts")]
pub struct AssignmentAverageItem {
    pub assignment_id: i64,
    pub title: String,
    pub average_score: Option<f64>,
}

/// 课程概览中的学员排名条目
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gradebook.ts")]
pub struct LearnerRankingItem {
    pub learner_id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub average_score: f64,
    pub graded_count: i64,
}

/// 课程概览响应（教师/管理端仪表盘）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/gradebook.ts")]
pub struct CourseOverview {
    pub course_id: i64,
    pub enrolled_count: i64,
    pub assignment_averages: Vec<AssignmentAverageItem>,
    /// 按平均分降序；同分时保持单次聚合内的稳定顺序
    pub top_performers: Vec<LearnerRankingItem>,
}
