use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::models::{ApiResponse, ErrorCode, lessons::requests::CreateLessonRequest};

pub async fn create_lesson(
    service: &LessonService,
    course_id: i64,
    lesson_data: CreateLessonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if lesson_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Lesson title must not be empty",
        )));
    }

    if let Some(position) = lesson_data.position
        && position < 1
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Lesson position must be at least 1",
        )));
    }

    let storage = service.get_storage(request);

    // 课程必须存在
    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
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
    }

    match storage.create_lesson(course_id, lesson_data).await {
        Ok(lesson) => Ok(HttpResponse::Created().json(ApiResponse::success(lesson, "课时创建成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Lesson creation failed: {e}"),
            )),
        ),
    }
}
