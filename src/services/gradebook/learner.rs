use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradebookService;
use super::compute;
use crate::models::gradebook::responses::LearnerCourseSummary;
use crate::models::submissions::entities::Submission;
use crate::models::{ApiResponse, ErrorCode};

pub async fn learner_summary(
    service: &GradebookService,
    course_id: i64,
    learner_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 选课记录是成绩摘要的载体
    let enrollment = match storage.get_enrollment(course_id, learner_id).await {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentNotFound,
                "Enrollment not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get enrollment: {e}"),
                )),
            );
        }
    };

    let assignments = match storage.list_course_assignments(course_id).await {
        Ok(assignments) => assignments,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course assignments: {e}"),
                )),
            );
        }
    };

    let submissions: Vec<Submission> = match storage.list_course_submissions(course_id).await {
        Ok(submissions) => submissions
            .into_iter()
            .filter(|s| s.learner_id == learner_id)
            .collect(),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course submissions: {e}"),
                )),
            );
        }
    };

    let (graded, pending, returned) = compute::status_counts(&submissions);

    let summary = LearnerCourseSummary {
        learner_id,
        course_id,
        average_score: compute::learner_course_average(&submissions, learner_id),
        graded_count: graded,
        pending_count: pending,
        returned_count: returned,
        course_progress: compute::course_progress(graded as usize, assignments.len()),
        lesson_progress: enrollment.progress,
        enrolled_at: enrollment.enrolled_at.to_rfc3339(),
        completed_at: enrollment.completed_at.map(|t| t.to_rfc3339()),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        summary,
        "Learner summary computed successfully",
    )))
}
