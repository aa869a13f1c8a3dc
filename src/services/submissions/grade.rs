use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::errors::LMSystemError;
use crate::models::{ApiResponse, ErrorCode, submissions::requests::GradeRequest};
use crate::utils::validate::validate_score;

pub async fn grade(
    service: &SubmissionService,
    submission_id: i64,
    grade_data: GradeRequest,
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

    let assignment = match storage
        .get_assignment_by_id(submission.assignment_id)
        .await
    {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get assignment information: {e}"),
                )),
            );
        }
    };

    // 越界分数直接拒绝，不做静默截断
    if let Err(msg) = validate_score(grade_data.score, assignment.max_score) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match storage
        .grade_submission(
            submission_id,
            submission.lock_version,
            grade_data.score,
            grade_data.feedback,
        )
        .await
    {
        Ok(graded) => {
            info!(
                "submission {} graded with score {}",
                submission_id, grade_data.score
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(graded, "评分成功")))
        }
        Err(LMSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ConcurrentModification, msg),
        )),
        Err(e) => {
            error!("Grading failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Grading failed: {e}"),
                )),
            )
        }
    }
}
