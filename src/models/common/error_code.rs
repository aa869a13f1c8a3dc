use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 业务错误码
///
/// 按 HTTP 语义分段：40xxx 客户端错误，50xxx 服务端错误。
/// 错误码随响应信封返回，前端据此做分支处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 400 参数/校验错误
    BadRequest = 40000,
    ValidationFailed = 40001,
    CourseNotPublished = 40002,
    AttemptsExhausted = 40003,
    InvalidStatusTransition = 40004,

    // 401 / 403
    Unauthorized = 40100,
    Forbidden = 40300,

    // 404 资源不存在
    NotFound = 40400,
    UserNotFound = 40401,
    CourseNotFound = 40402,
    LessonNotFound = 40403,
    AssignmentNotFound = 40404,
    EnrollmentNotFound = 40405,
    SubmissionNotFound = 40406,

    // 409 冲突
    Conflict = 40900,
    AlreadyEnrolled = 40901,
    ConcurrentModification = 40902,
    UserAlreadyExists = 40903,
    LessonAlreadyCompleted = 40904,

    // 500
    InternalServerError = 50000,
}
