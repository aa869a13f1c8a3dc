use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::responses::{
    SubmissionAssignmentInfo, SubmissionLearner, SubmissionResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn get_submission(
    service: &SubmissionService,
    submission_id: i64,
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

/// 组装提交详情：补全学员与作业信息
pub(crate) async fn build_submission_response(
    storage: &dyn Storage,
    submission: Submission,
) -> crate::errors::Result<SubmissionResponse> {
    let learner = storage
        .get_user_by_id(submission.learner_id)
        .await?
        .map(|u| SubmissionLearner {
            id: u.id,
            username: u.username,
            display_name: u.display_name,
        })
        .unwrap_or(SubmissionLearner {
            id: submission.learner_id,
            username: String::new(),
            display_name: None,
        });

    let assignment = storage
        .get_assignment_by_id(submission.assignment_id)
        .await?
        .map(|a| SubmissionAssignmentInfo {
            id: a.id,
            title: a.title,
            max_score: a.max_score,
            passing_score: a.passing_score,
            due_date: a.due_date.map(|d| d.to_rfc3339()),
        });

    Ok(SubmissionResponse {
        id: submission.id,
        assignment_id: submission.assignment_id,
        learner,
        content: submission.content,
        file_refs: submission.file_refs.unwrap_or_default(),
        github_url: submission.github_url,
        status: submission.status.to_string(),
        score: submission.score,
        feedback: submission.feedback,
        attempt: submission.attempt,
        is_late: submission.is_late,
        submitted_at: submission.submitted_at.to_rfc3339(),
        graded_at: submission.graded_at.map(|t| t.to_rfc3339()),
        assignment,
    })
}
