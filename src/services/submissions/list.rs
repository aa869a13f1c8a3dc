use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{
    ApiResponse, ErrorCode,
    submissions::requests::{SubmissionListParams, SubmissionListQuery},
};

pub async fn list_submissions(
    service: &SubmissionService,
    query: SubmissionListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = SubmissionListQuery::from(query);

    match storage.list_submissions_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Submission list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve submission list: {e}"),
            )),
        ),
    }
}
