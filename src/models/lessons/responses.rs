use serde::Serialize;
use ts_rs::TS;

use crate::models::lessons::entities::Lesson;

/// 课时列表响应（按 position 排序，无分页）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonListResponse {
    pub items: Vec<Lesson>,
}

/// 课时完成响应：返回完成后的选课进度
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct CompleteLessonResponse {
    pub lesson_id: i64,
    pub learner_id: i64,
    /// 完成后的课时进度（0-100）
    pub progress: i32,
    /// 进度到 100 时的结课时间
    pub course_completed_at: Option<String>,
}
