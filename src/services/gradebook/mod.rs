pub mod assignment;
pub mod compute;
pub mod course;
pub mod learner;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

/// 成绩册聚合服务
///
/// 只读：所有统计即算即得，不写任何业务表，尤其不碰
/// Enrollment.progress（其唯一写入方是课时完成服务）。
pub struct GradebookService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradebookService {
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

    // 学员课程成绩摘要
    pub async fn learner_summary(
        &self,
        course_id: i64,
        learner_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        learner::learner_summary(self, course_id, learner_id, request).await
    }

    // 单个作业统计
    pub async fn assignment_stats(
        &self,
        assignment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignment::assignment_stats(self, assignment_id, request).await
    }

    // 课程完成度统计
    pub async fn course_completion(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        course::course_completion(self, course_id, request).await
    }

    // 课程概览
    pub async fn course_overview(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        course::course_overview(self, course_id, request).await
    }
}
