//! 业务数据模型
//!
//! 按领域划分：每个领域包含 entities（业务实体）、requests（请求参数）、
//! responses（响应结构）。common 存放跨领域的 API 信封与分页结构。

pub mod common;

pub mod assignments;
pub mod courses;
pub mod enrollments;
pub mod gradebook;
pub mod lessons;
pub mod submissions;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，用于运行时长统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
