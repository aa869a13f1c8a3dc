use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EnrollmentService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn unenroll(
    service: &EnrollmentService,
    course_id: i64,
    learner_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.unenroll_learner(course_id, learner_id).await {
        Ok(true) => {
            info!(
                "learner {} unenrolled from course {}",
                learner_id, course_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Unenrolled successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Unenroll failed: {e}"),
            )),
        ),
    }
}
