pub mod complete;
pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::lessons::requests::{CompleteLessonRequest, CreateLessonRequest};
use crate::storage::Storage;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建课时
    pub async fn create_lesson(
        &self,
        course_id: i64,
        lesson_data: CreateLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, course_id, lesson_data, request).await
    }

    // 课时列表
    pub async fn list_lessons(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, course_id, request).await
    }

    // 学员完成课时
    pub async fn complete_lesson(
        &self,
        lesson_id: i64,
        complete_data: CompleteLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        complete::complete_lesson(self, lesson_id, complete_data, request).await
    }

    // 删除课时
    pub async fn delete_lesson(
        &self,
        lesson_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lesson(self, lesson_id, request).await
    }
}
