use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseStatus {
    Draft,     // 草稿，仅教师可见
    Published, // 已发布，可选课
    Archived,  // 已归档，只读
}

impl CourseStatus {
    pub const DRAFT: &'static str = "draft";
    pub const PUBLISHED: &'static str = "published";
    pub const ARCHIVED: &'static str = "archived";

    /// 状态迁移是否合法
    ///
    /// draft → published → archived，归档课程可重新发布；
    /// 任何状态都不允许退回 draft。
    pub fn can_transition_to(&self, target: CourseStatus) -> bool {
        matches!(
            (self, target),
            (CourseStatus::Draft, CourseStatus::Published)
                | (CourseStatus::Published, CourseStatus::Archived)
                | (CourseStatus::Archived, CourseStatus::Published)
        )
    }
}

impl<'de> Deserialize<'de> for CourseStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            CourseStatus::DRAFT => Ok(CourseStatus::Draft),
            CourseStatus::PUBLISHED => Ok(CourseStatus::Published),
            CourseStatus::ARCHIVED => Ok(CourseStatus::Archived),
            _ => Err(serde::de::Error::custom(format!(
                "无效的课程状态: '{s}'. 支持的状态: draft, published, archived"
            ))),
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseStatus::Draft => write!(f, "{}", CourseStatus::DRAFT),
            CourseStatus::Published => write!(f, "{}", CourseStatus::PUBLISHED),
            CourseStatus::Archived => write!(f, "{}", CourseStatus::ARCHIVED),
        }
    }
}

impl std::str::FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CourseStatus::Draft),
            "published" => Ok(CourseStatus::Published),
            "archived" => Ok(CourseStatus::Archived),
            _ => Err(format!("Invalid course status: {s}")),
        }
    }
}

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: CourseStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(CourseStatus::Draft.can_transition_to(CourseStatus::Published));
        assert!(CourseStatus::Published.can_transition_to(CourseStatus::Archived));
        assert!(CourseStatus::Archived.can_transition_to(CourseStatus::Published));

        // 不允许退回草稿，也不允许跳过发布直接归档
        assert!(!CourseStatus::Published.can_transition_to(CourseStatus::Draft));
        assert!(!CourseStatus::Archived.can_transition_to(CourseStatus::Draft));
        assert!(!CourseStatus::Draft.can_transition_to(CourseStatus::Archived));
        assert!(!CourseStatus::Draft.can_transition_to(CourseStatus::Draft));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "published".parse::<CourseStatus>().unwrap(),
            CourseStatus::Published
        );
        assert!("deleted".parse::<CourseStatus>().is_err());
    }
}
