use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::submissions::requests::{
    GradeRequest, ReturnForRevisionRequest, SubmissionListParams, SubmitRequest,
};
use crate::services::SubmissionService;
use crate::utils::{SafeAssignmentIdI64, SafeLearnerIdI64, SafeSubmissionIdI64};

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// HTTP处理程序
pub async fn submit(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    submit_data: web::Json<SubmitRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit(assignment_id.0, submit_data.into_inner(), &req)
        .await
}

pub async fn get_learner_submission(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    learner_id: SafeLearnerIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_learner_submission(assignment_id.0, learner_id.0, &req)
        .await
}

pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(query.into_inner(), &req)
        .await
}

pub async fn get_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(submission_id.0, &req)
        .await
}

pub async fn grade(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    grade_data: web::Json<GradeRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade(submission_id.0, grade_data.into_inner(), &req)
        .await
}

pub async fn return_for_revision(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    revision_data: web::Json<ReturnForRevisionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .return_for_revision(submission_id.0, revision_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments/{assignment_id}/submissions")
            .route("", web::post().to(submit))
            .route("/{learner_id}", web::get().to(get_learner_submission)),
    )
    .service(
        web::scope("/api/v1/submissions")
            .route("", web::get().to(list_submissions))
            .route("/{submission_id}", web::get().to(get_submission))
            .route("/{submission_id}/grade", web::post().to(grade))
            .route("/{submission_id}/return", web::post().to(return_for_revision)),
    );
}
