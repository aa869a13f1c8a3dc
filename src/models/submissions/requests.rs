use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;
use crate::models::submissions::entities::SubmissionStatus;

/// 提交/重交请求
///
/// content、file_refs、github_url 至少一项非空；文件引用是不透明
/// 字符串，内容校验由上传服务负责。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmitRequest {
    pub learner_id: i64,
    pub content: Option<String>,
    pub file_refs: Option<Vec<String>>,
    pub github_url: Option<String>,
}

impl SubmitRequest {
    /// 提交内容是否全部为空
    pub fn is_empty_payload(&self) -> bool {
        let content_empty = self
            .content
            .as_deref()
            .map(|c| c.trim().is_empty())
            .unwrap_or(true);
        let files_empty = self
            .file_refs
            .as_ref()
            .map(|f| f.iter().all(|r| r.trim().is_empty()))
            .unwrap_or(true);
        let url_empty = self
            .github_url
            .as_deref()
            .map(|u| u.trim().is_empty())
            .unwrap_or(true);
        content_empty && files_empty && url_empty
    }
}

/// 评分请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeRequest {
    pub score: f64,
    pub feedback: Option<String>,
}

/// 退回修改请求（不给分）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct ReturnForRevisionRequest {
    pub feedback: Option<String>,
}

/// 提交列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub assignment_id: Option<i64>,
    pub learner_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<i64>,
    pub learner_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
}

impl From<SubmissionListParams> for SubmissionListQuery {
    fn from(params: SubmissionListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            assignment_id: params.assignment_id,
            learner_id: params.learner_id,
            status: params.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(
        content: Option<&str>,
        file_refs: Option<Vec<&str>>,
        github_url: Option<&str>,
    ) -> SubmitRequest {
        SubmitRequest {
            learner_id: 1,
            content: content.map(str::to_string),
            file_refs: file_refs.map(|f| f.into_iter().map(str::to_string).collect()),
            github_url: github_url.map(str::to_string),
        }
    }

    #[test]
    fn test_all_empty_payload() {
        assert!(req(None, None, None).is_empty_payload());
        assert!(req(Some("   "), Some(vec![]), Some("")).is_empty_payload());
        assert!(req(Some(""), Some(vec!["  "]), None).is_empty_payload());
    }

    #[test]
    fn test_any_field_fills_payload() {
        assert!(!req(Some("my essay"), None, None).is_empty_payload());
        assert!(!req(None, Some(vec!["file-token-1"]), None).is_empty_payload());
        assert!(!req(None, None, Some("https://github.com/a/b")).is_empty_payload());
    }
}
