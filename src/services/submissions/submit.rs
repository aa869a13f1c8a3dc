use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::errors::LMSystemError;
use crate::models::{ApiResponse, ErrorCode, submissions::requests::SubmitRequest};

pub async fn submit(
    service: &SubmissionService,
    assignment_id: i64,
    submit_data: SubmitRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // content、file_refs、github_url 至少一项非空
    if submit_data.is_empty_payload() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Submission payload must contain content, file references or a repository URL",
        )));
    }

    let storage = service.get_storage(request);
    let learner_id = submit_data.learner_id;

    // 作业必须存在
    let assignment = match storage.get_assignment_by_id(assignment_id).await {
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

    // 学员必须已选该作业所在课程
    match storage
        .get_enrollment(assignment.course_id, learner_id)
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                "Learner is not enrolled in the assignment's course",
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

    let existing = match storage
        .get_submission_by_assignment_and_learner(assignment_id, learner_id)
        .await
    {
        Ok(existing) => existing,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check prior submission: {e}"),
                )),
            );
        }
    };

    // 截止时间之后的提交标记为迟交，但不拒绝
    let is_late = assignment
        .due_date
        .map(|due| chrono::Utc::now() > due)
        .unwrap_or(false);

    let result = match existing {
        None => storage.create_submission(assignment_id, submit_data, is_late).await,
        Some(ref prior) => {
            // 重交受次数上限约束
            if let Some(max_attempts) = assignment.max_attempts
                && prior.attempt >= max_attempts
            {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::AttemptsExhausted,
                    format!("All {max_attempts} attempts have been used"),
                )));
            }
            storage.resubmit_submission(prior, submit_data, is_late).await
        }
    };

    match result {
        Ok(submission) => {
            info!(
                "submission {} for assignment {} stored (attempt {})",
                submission.id, assignment_id, submission.attempt
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
        }
        Err(LMSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ConcurrentModification, msg),
        )),
        Err(e) => {
            error!("Submission failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Submission failed: {e}"),
                )),
            )
        }
    }
}
