pub mod detail;
pub mod grade;
pub mod list;
pub mod lookup;
pub mod revision;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{
    GradeRequest, ReturnForRevisionRequest, SubmissionListParams, SubmitRequest,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    // 提交/重交作业
    pub async fn submit(
        &self,
        assignment_id: i64,
        submit_data: SubmitRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit(self, assignment_id, submit_data, request).await
    }

    // 提交详情
    pub async fn get_submission(
        &self,
        submission_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, submission_id, request).await
    }

    // 学员在某作业下的提交
    pub async fn get_learner_submission(
        &self,
        assignment_id: i64,
        learner_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        lookup::get_learner_submission(self, assignment_id, learner_id, request).await
    }

    // 提交列表
    pub async fn list_submissions(
        &self,
        query: SubmissionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, query, request).await
    }

    // 评分
    pub async fn grade(
        &self,
        submission_id: i64,
        grade_data: GradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade(self, submission_id, grade_data, request).await
    }

    // 退回修改
    pub async fn return_for_revision(
        &self,
        submission_id: i64,
        revision_data: ReturnForRevisionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        revision::return_for_revision(self, submission_id, revision_data, request).await
    }
}
