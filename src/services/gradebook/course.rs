use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::GradebookService;
use super::compute;
use crate::models::courses::entities::Course;
use crate::models::gradebook::responses::{
    AssignmentAverageItem, AssignmentCompletionItem, CourseCompletionStats, CourseOverview,
};
use crate::models::submissions::entities::Submission;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

async fn load_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<Course, HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get course information: {e}"),
            )),
        ),
    }
}

pub async fn course_completion(
    service: &GradebookService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = load_course(&storage, course_id).await {
        return Ok(response);
    }

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

    let submissions = match storage.list_course_submissions(course_id).await {
        Ok(submissions) => submissions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course submissions: {e}"),
                )),
            );
        }
    };

    let enrolled_count = match storage.count_course_enrollments(course_id).await {
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

    let items = assignments
        .into_iter()
        .map(|assignment| {
            let assignment_submissions: Vec<Submission> = submissions
                .iter()
                .filter(|s| s.assignment_id == assignment.id)
                .cloned()
                .collect();
            let (graded, pending, returned) = compute::status_counts(&assignment_submissions);

            AssignmentCompletionItem {
                assignment_id: assignment.id,
                title: assignment.title,
                graded,
                pending,
                returned,
                not_submitted: compute::not_submitted_count(
                    &assignment_submissions,
                    enrolled_count,
                ),
            }
        })
        .collect();

    let stats = CourseCompletionStats {
        course_id,
        enrolled_count,
        assignments: items,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        stats,
        "Course completion statistics computed successfully",
    )))
}

pub async fn course_overview(
    service: &GradebookService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(response) = load_course(&storage, course_id).await {
        return Ok(response);
    }

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

    let submissions = match storage.list_course_submissions(course_id).await {
        Ok(submissions) => submissions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course submissions: {e}"),
                )),
            );
        }
    };

    let enrollments = match storage.list_course_enrollments(course_id).await {
        Ok(enrollments) => enrollments,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course enrollments: {e}"),
                )),
            );
        }
    };

    // 选课顺序即同分学员的展示顺序
    let learner_order: Vec<i64> = enrollments.iter().map(|e| e.learner_id).collect();

    let users: HashMap<i64, _> = match storage.get_users_by_ids(learner_order.clone()).await {
        Ok(users) => users.into_iter().map(|u| (u.id, u)).collect(),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get learner information: {e}"),
                )),
            );
        }
    };

    let assignment_averages = assignments
        .into_iter()
        .map(|assignment| {
            let scores: Vec<f64> = compute::graded_scores(
                &submissions
                    .iter()
                    .filter(|s| s.assignment_id == assignment.id)
                    .cloned()
                    .collect::<Vec<Submission>>(),
            );
            AssignmentAverageItem {
                assignment_id: assignment.id,
                title: assignment.title,
                average_score: compute::average(&scores),
            }
        })
        .collect();

    let overview = CourseOverview {
        course_id,
        enrolled_count: enrollments.len() as i64,
        assignment_averages,
        top_performers: compute::rank_learners(&submissions, &learner_order, &users),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        overview,
        "Course overview computed successfully",
    )))
}
