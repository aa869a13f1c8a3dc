use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::requests::{EnrollmentListParams, EnrollmentListQuery},
};

pub async fn list_enrollments(
    service: &EnrollmentService,
    query: EnrollmentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = EnrollmentListQuery::from(query);

    match storage.list_enrollments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Enrollment list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve enrollment list: {e}"),
            )),
        ),
    }
}
