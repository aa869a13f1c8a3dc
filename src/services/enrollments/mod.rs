pub mod enroll;
pub mod list;
pub mod unenroll;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::{EnrollRequest, EnrollmentListParams};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    // 学员选课
    pub async fn enroll(
        &self,
        course_id: i64,
        enroll_data: EnrollRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll(self, course_id, enroll_data, request).await
    }

    // 学员退课
    pub async fn unenroll(
        &self,
        course_id: i64,
        learner_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        unenroll::unenroll(self, course_id, learner_id, request).await
    }

    // 选课列表
    pub async fn list_enrollments(
        &self,
        query: EnrollmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, query, request).await
    }
}
