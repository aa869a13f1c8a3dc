use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;

/// 选课列表项（附学员信息）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListItem {
    pub id: i64,
    pub course_id: i64,
    pub learner_id: i64,
    pub learner_username: String,
    pub learner_display_name: Option<String>,
    pub progress: i32,
    pub enrolled_at: String,
    pub completed_at: Option<String>,
}

/// 选课列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListResponse {
    pub items: Vec<EnrollmentListItem>,
    pub pagination: PaginationInfo,
}
