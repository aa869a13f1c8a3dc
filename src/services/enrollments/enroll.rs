use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EnrollmentService;
use crate::errors::LMSystemError;
use crate::models::courses::entities::CourseStatus;
use crate::models::{ApiResponse, ErrorCode, enrollments::requests::EnrollRequest};

pub async fn enroll(
    service: &EnrollmentService,
    course_id: i64,
    enroll_data: EnrollRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let learner_id = enroll_data.learner_id;

    // 课程必须存在且已发布
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

    if course.status != CourseStatus::Published {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CourseNotPublished,
            "Only published courses accept enrollments",
        )));
    }

    // 学员必须存在
    match storage.get_user_by_id(learner_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Learner not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get learner information: {e}"),
                )),
            );
        }
    }

    // 重复选课前置检查，并发落败由唯一索引兜底
    match storage.get_enrollment(course_id, learner_id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AlreadyEnrolled,
                "Learner is already enrolled in this course",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check enrollment: {e}"),
                )),
            );
        }
    }

    match storage.enroll_learner(course_id, learner_id).await {
        Ok(enrollment) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(enrollment, "选课成功")))
        }
        Err(LMSystemError::Conflict(msg)) => {
            Ok(HttpResponse::Conflict()
                .json(ApiResponse::error_empty(ErrorCode::AlreadyEnrolled, msg)))
        }
        Err(e) => {
            error!("Enrollment failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Enrollment failed: {e}"),
                )),
            )
        }
    }
}
