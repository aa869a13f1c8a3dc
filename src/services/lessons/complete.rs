use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::LessonService;
use crate::errors::LMSystemError;
use crate::models::{ApiResponse, ErrorCode, lessons::requests::CompleteLessonRequest};

pub async fn complete_lesson(
    service: &LessonService,
    lesson_id: i64,
    complete_data: CompleteLessonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let learner_id = complete_data.learner_id;

    // 课时必须存在
    let lesson = match storage.get_lesson_by_id(lesson_id).await {
        Ok(Some(lesson)) => lesson,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::LessonNotFound,
                "Lesson not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get lesson information: {e}"),
                )),
            );
        }
    };

    // 学员必须已选课
    match storage.get_enrollment(lesson.course_id, learner_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Learner is not enrolled in this course",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check enrollment: {e}"),
                )),
            );
        }
    }

    // 重复完成前置检查，并发落败由唯一索引兜底
    match storage.has_lesson_completion(lesson_id, learner_id).await {
        Ok(true) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::LessonAlreadyCompleted,
                "Lesson already completed by this learner",
            )));
        }
        Ok(false) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check lesson completion: {e}"),
                )),
            );
        }
    }

    match storage
        .complete_lesson(lesson.course_id, lesson_id, learner_id)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "课时完成"))),
        Err(LMSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::LessonAlreadyCompleted, msg))),
        Err(e) => {
            error!("Lesson completion failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Lesson completion failed: {e}"),
                )),
            )
        }
    }
}
