use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::errors::LMSystemError;
use crate::models::{ApiResponse, ErrorCode, submissions::requests::ReturnForRevisionRequest};

pub async fn return_for_revision(
    service: &SubmissionService,
    submission_id: i64,
    revision_data: ReturnForRevisionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
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

    match storage
        .return_submission_for_revision(
            submission_id,
            submission.lock_version,
            revision_data.feedback,
        )
        .await
    {
        Ok(returned) => {
            info!("submission {} returned for revision", submission_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(returned, "已退回修改")))
        }
        Err(LMSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ConcurrentModification, msg),
        )),
        Err(e) => {
            error!("Return for revision failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Return for revision failed: {e}"),
                )),
            )
        }
    }
}
