use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::requests::{AssignmentListParams, AssignmentListQuery},
};

pub async fn list_assignments(
    service: &AssignmentService,
    course_id: i64,
    query: AssignmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
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

    let list_query = AssignmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        course_id: Some(course_id),
        kind: query.kind,
        search: query.search,
    };

    match storage.list_assignments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assignment list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve assignment list: {e}"),
            )),
        ),
    }
}
