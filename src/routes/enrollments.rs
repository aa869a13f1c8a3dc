use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::enrollments::requests::{EnrollRequest, EnrollmentListParams};
use crate::services::EnrollmentService;
use crate::utils::{SafeCourseIdI64, SafeLearnerIdI64};

// 懒加载的全局 EnrollmentService 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// HTTP处理程序
pub async fn enroll(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    enroll_data: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .enroll(course_id.0, enroll_data.into_inner(), &req)
        .await
}

pub async fn unenroll(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    learner_id: SafeLearnerIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .unenroll(course_id.0, learner_id.0, &req)
        .await
}

pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentListParams>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments").route("", web::get().to(list_enrollments)),
    )
    .service(
        web::scope("/api/v1/courses/{course_id}/enrollments")
            .route("", web::post().to(enroll))
            .route("/{learner_id}", web::delete().to(unenroll)),
    );
}
