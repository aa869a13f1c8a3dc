use serde::Deserialize;
use ts_rs::TS;

/// 创建课时请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct CreateLessonRequest {
    pub title: String,
    pub content: Option<String>,
    /// 不指定时追加到课程末尾
    pub position: Option<i32>,
}

/// 课时完成请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct CompleteLessonRequest {
    pub learner_id: i64,
}
