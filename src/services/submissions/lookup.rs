use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use super::detail::build_submission_response;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_learner_submission(
    service: &SubmissionService,
    assignment_id: i64,
    learner_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match storage
        .get_submission_by_assignment_and_learner(assignment_id, learner_id)
        .await
    {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "No submission for this learner and assignment",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get submission: {e}"),
                )),
            );
        }
    };

    match build_submission_response(storage.as_ref(), submission).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Submission retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to assemble submission detail: {e}"),
            )),
        ),
    }
}
