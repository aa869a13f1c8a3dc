use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;
use crate::models::courses::entities::CourseStatus;

/// 创建课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
}

/// 更新课程请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// 课程状态迁移请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseStatusRequest {
    pub status: CourseStatus,
}

/// 课程列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub teacher_id: Option<i64>,
    pub status: Option<CourseStatus>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub status: Option<CourseStatus>,
    pub search: Option<String>,
}

impl From<CourseListParams> for CourseListQuery {
    fn from(params: CourseListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            teacher_id: params.teacher_id,
            status: params.status,
            search: params.search,
        }
    }
}
