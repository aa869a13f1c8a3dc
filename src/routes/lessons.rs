use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::lessons::requests::{CompleteLessonRequest, CreateLessonRequest};
use crate::services::LessonService;
use crate::utils::{SafeCourseIdI64, SafeLessonIdI64};

// 懒加载的全局 LessonService 实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

// HTTP处理程序
pub async fn create_lesson(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    lesson_data: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .create_lesson(course_id.0, lesson_data.into_inner(), &req)
        .await
}

pub async fn list_lessons(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(course_id.0, &req).await
}

pub async fn complete_lesson(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
    complete_data: web::Json<CompleteLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .complete_lesson(lesson_id.0, complete_data.into_inner(), &req)
        .await
}

pub async fn delete_lesson(
    req: HttpRequest,
    lesson_id: SafeLessonIdI64,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(lesson_id.0, &req).await
}

// 配置路由
pub fn configure_lesson_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses/{course_id}/lessons")
            .route("", web::get().to(list_lessons))
            .route("", web::post().to(create_lesson)),
    )
    .service(
        web::scope("/api/v1/lessons/{lesson_id}")
            .route("", web::delete().to(delete_lesson))
            .route("/complete", web::post().to(complete_lesson)),
    );
}
