use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 选课请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollRequest {
    pub learner_id: i64,
}

/// 选课列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
    pub learner_id: Option<i64>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct EnrollmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub learner_id: Option<i64>,
}

impl From<EnrollmentListParams> for EnrollmentListQuery {
    fn from(params: EnrollmentListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            course_id: params.course_id,
            learner_id: params.learner_id,
        }
    }
}
