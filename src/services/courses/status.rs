use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::UpdateCourseStatusRequest};

pub async fn update_course_status(
    service: &CourseService,
    course_id: i64,
    status_data: UpdateCourseStatusRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course information: {e}"),
                )),
            );
        }
    };

    // 状态机校验：draft→published→archived→published
    if !course.status.can_transition_to(status_data.status) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidStatusTransition,
            format!(
                "Cannot transition course from {} to {}",
                course.status, status_data.status
            ),
        )));
    }

    match storage
        .update_course_status(course_id, status_data.status)
        .await
    {
        Ok(Some(course)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程状态更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Course status update failed: {e}"),
            )),
        ),
    }
}
