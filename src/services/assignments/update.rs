use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode, assignments::requests::UpdateAssignmentRequest};
use crate::utils::validate::{validate_questions, validate_score_bounds};

pub async fn update_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    update_data: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref title) = update_data.title
        && title.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Assignment title must not be empty",
        )));
    }

    let storage = service.get_storage(request);

    let existing = match storage.get_assignment_by_id(assignment_id).await {
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

    // 以更新后的生效值校验分数边界
    let max_score = update_data.max_score.unwrap_or(existing.max_score);
    let passing_score = update_data.passing_score.unwrap_or(existing.passing_score);
    if let Err(msg) = validate_score_bounds(max_score, passing_score) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    if let Some(ref questions) = update_data.questions {
        if !existing.kind.supports_questions() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                format!(
                    "Assignments of kind '{}' do not carry questions",
                    existing.kind
                ),
            )));
        }
        if let Err(msg) = validate_questions(questions) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    }

    match storage.update_assignment(assignment_id, update_data).await {
        Ok(Some(assignment)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Assignment update failed: {e}"),
            )),
        ),
    }
}
