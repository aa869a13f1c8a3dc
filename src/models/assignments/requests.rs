use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::assignments::entities::{AssignmentKind, Question};
use crate::models::common::pagination::PaginationQuery;

/// 创建作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: Option<String>,
    pub kind: AssignmentKind,
    pub max_score: f64,
    /// 及格线百分比，缺省 60
    pub passing_score: Option<f64>,
    pub due_date: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-09-01T12:00:00Z"
    pub time_limit_minutes: Option<i32>,
    pub max_attempts: Option<i32>,
    pub questions: Option<Vec<Question>>,
}

/// 更新作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub max_score: Option<f64>,
    pub passing_score: Option<f64>,
    pub due_date: Option<DateTime<Utc>>, // ISO 8601 格式
    pub time_limit_minutes: Option<i32>,
    pub max_attempts: Option<i32>,
    pub questions: Option<Vec<Question>>,
}

/// 作业列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub kind: Option<AssignmentKind>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub kind: Option<AssignmentKind>,
    pub search: Option<String>,
}
