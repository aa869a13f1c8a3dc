use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode, assignments::requests::CreateAssignmentRequest};
use crate::utils::validate::{validate_questions, validate_score_bounds};

pub async fn create_assignment(
    service: &AssignmentService,
    course_id: i64,
    assignment_data: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if assignment_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Assignment title must not be empty",
        )));
    }

    if let Err(msg) = validate_score_bounds(
        assignment_data.max_score,
        assignment_data.passing_score.unwrap_or(60.0),
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    if let Some(limit) = assignment_data.time_limit_minutes
        && limit < 1
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Time limit must be at least 1 minute",
        )));
    }

    if let Some(attempts) = assignment_data.max_attempts
        && attempts < 1
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Max attempts must be at least 1",
        )));
    }

    // 题目只允许出现在测验类作业上
    if let Some(ref questions) = assignment_data.questions {
        if !assignment_data.kind.supports_questions() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                format!(
                    "Assignments of kind '{}' do not carry questions",
                    assignment_data.kind
                ),
            )));
        }
        if let Err(msg) = validate_questions(questions) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
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

    match storage.create_assignment(course_id, assignment_data).await {
        Ok(assignment) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
        }
        Err(e) => {
            error!("Assignment creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Assignment creation failed: {e}"),
                )),
            )
        }
    }
}
