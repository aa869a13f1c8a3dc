use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::UpdateCourseRequest};

pub async fn update_course(
    service: &CourseService,
    course_id: i64,
    update_data: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref title) = update_data.title
        && title.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Course title must not be empty",
        )));
    }

    let storage = service.get_storage(request);

    match storage.update_course(course_id, update_data).await {
        Ok(Some(course)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Course update failed: {e}"),
            )),
        ),
    }
}
