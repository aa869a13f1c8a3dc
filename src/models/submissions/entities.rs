use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交状态
//
// 状态机：
//   pending --grade--> graded
//   pending --return_for_revision--> returned
//   graded --grade--> graded（教师改分）
//   returned --grade--> graded（教师不等重交直接给分）
//   graded/returned --学员重交--> pending（清空评分）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Pending,  // 待批改
    Graded,   // 已评分
    Returned, // 退回修改（教师不给分要求重做）
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const GRADED: &'static str = "graded";
    pub const RETURNED: &'static str = "returned";
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionStatus::PENDING => Ok(SubmissionStatus::Pending),
            SubmissionStatus::GRADED => Ok(SubmissionStatus::Graded),
            SubmissionStatus::RETURNED => Ok(SubmissionStatus::Returned),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: pending, graded, returned"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "{}", SubmissionStatus::PENDING),
            SubmissionStatus::Graded => write!(f, "{}", SubmissionStatus::GRADED),
            SubmissionStatus::Returned => write!(f, "{}", SubmissionStatus::RETURNED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "graded" => Ok(SubmissionStatus::Graded),
            "returned" => Ok(SubmissionStatus::Returned),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

/// 提交实体
///
/// 每个 (learner_id, assignment_id) 至多一条记录，重交覆盖本记录并
/// 回到 pending；score 仅在 graded 状态下有值。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub learner_id: i64,
    pub content: Option<String>,
    pub file_refs: Option<Vec<String>>,
    pub github_url: Option<String>,
    pub status: SubmissionStatus,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub attempt: i32,
    pub is_late: bool,
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub lock_version: i32,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Graded,
            SubmissionStatus::Returned,
        ] {
            assert_eq!(
                SubmissionStatus::from_str(&status.to_string()).unwrap(),
                status
            );
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!(SubmissionStatus::from_str("in_review").is_err());
    }
}
