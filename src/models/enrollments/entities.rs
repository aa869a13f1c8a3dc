use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 选课记录
///
/// progress 为课时完成进度（0-100 整数百分比），由课时完成服务维护；
/// 评分簿只读取展示，与作业批改进度（course_progress）是两个独立概念。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub learner_id: i64,
    pub progress: i32,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}
