use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradebookService;
use super::compute;
use crate::models::gradebook::responses::AssignmentStats;
use crate::models::{ApiResponse, ErrorCode};

pub async fn assignment_stats(
    service: &GradebookService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    let submissions = match storage.list_assignment_submissions(assignment_id).await {
        Ok(submissions) => submissions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get assignment submissions: {e}"),
                )),
            );
        }
    };

    let enrolled_count = match storage.count_course_enrollments(assignment.course_id).await {
        Ok(count) => count,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to count enrollments: {e}"),
                )),
            );
        }
    };

    let scores = compute::graded_scores(&submissions);
    let (graded, pending, returned) = compute::status_counts(&submissions);

    let stats = AssignmentStats {
        assignment_id,
        title: assignment.title,
        max_score: assignment.max_score,
        average_score: compute::average(&scores),
        highest_score: scores.iter().cloned().fold(None, |acc: Option<f64>, s| {
            Some(acc.map_or(s, |a| a.max(s)))
        }),
        lowest_score: scores.iter().cloned().fold(None, |acc: Option<f64>, s| {
            Some(acc.map_or(s, |a| a.min(s)))
        }),
        graded,
        pending,
        returned,
        not_submitted: compute::not_submitted_count(&submissions, enrolled_count),
        score_distribution: compute::score_distribution(&scores, assignment.max_score),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        stats,
        "Assignment statistics computed successfully",
    )))
}
