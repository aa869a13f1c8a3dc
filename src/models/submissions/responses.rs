use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;

/// 提交者信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionLearner {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
}

/// 提交关联的作业信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionAssignmentInfo {
    pub id: i64,
    pub title: String,
    pub max_score: f64,
    pub passing_score: f64,
    pub due_date: Option<String>,
}

/// 提交详情响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionResponse {
    pub id: i64,
    pub assignment_id: i64,
    pub learner: SubmissionLearner,
    pub content: Option<String>,
    pub file_refs: Vec<String>,
    pub github_url: Option<String>,
    pub status: String,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub attempt: i32,
    pub is_late: bool,
    pub submitted_at: String,
    pub graded_at: Option<String>,
    pub assignment: Option<SubmissionAssignmentInfo>,
}

/// 提交列表项（附提交者信息）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListItem {
    pub id: i64,
    pub assignment_id: i64,
    pub learner_id: i64,
    pub learner: SubmissionLearner,
    pub status: String,
    pub score: Option<f64>,
    pub attempt: i32,
    pub is_late: bool,
    pub submitted_at: String,
    pub graded_at: Option<String>,
}

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}
