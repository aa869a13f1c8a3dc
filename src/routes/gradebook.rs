use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::GradebookService;
use crate::utils::{SafeAssignmentIdI64, SafeCourseIdI64, SafeLearnerIdI64};

// 懒加载的全局 GradebookService 实例
static GRADEBOOK_SERVICE: Lazy<GradebookService> = Lazy::new(GradebookService::new_lazy);

// HTTP处理程序
pub async fn learner_summary(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    learner_id: SafeLearnerIdI64,
) -> ActixResult<HttpResponse> {
    GRADEBOOK_SERVICE
        .learner_summary(course_id.0, learner_id.0, &req)
        .await
}

pub async fn course_completion(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    GRADEBOOK_SERVICE.course_completion(course_id.0, &req).await
}

pub async fn course_overview(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    GRADEBOOK_SERVICE.course_overview(course_id.0, &req).await
}

pub async fn assignment_stats(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    GRADEBOOK_SERVICE
        .assignment_stats(assignment_id.0, &req)
        .await
}

// 配置路由
pub fn configure_gradebook_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/gradebook")
            .route("/learners/{learner_id}", web::get().to(learner_summary))
            .route("/completion", web::get().to(course_completion))
            .route("/overview", web::get().to(course_overview)),
    )
    .service(
        web::scope("/api/v1/assignments/{assignment_id}/stats")
            .route("", web::get().to(assignment_stats)),
    );
}
