use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};

pub async fn create_course(
    service: &CourseService,
    course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if course_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Course title must not be empty",
        )));
    }

    let storage = service.get_storage(request);

    // 授课教师必须存在且具备教师身份
    let teacher = match storage.get_user_by_id(course_data.teacher_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get teacher information: {e}"),
                )),
            );
        }
    };

    if teacher.role == UserRole::Student {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Course owner must be a teacher or admin",
        )));
    }

    match storage.create_course(course_data).await {
        Ok(course) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "课程创建成功")))
        }
        Err(e) => {
            error!("Course creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Course creation failed: {e}"),
                )),
            )
        }
    }
}
