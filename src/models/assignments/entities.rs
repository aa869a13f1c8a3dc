use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentKind {
    Test,      // 测验
    Practical, // 实践作业
    Project,   // 项目
    Quiz,      // 小测
}

impl AssignmentKind {
    pub const TEST: &'static str = "test";
    pub const PRACTICAL: &'static str = "practical";
    pub const PROJECT: &'static str = "project";
    pub const QUIZ: &'static str = "quiz";

    /// 是否允许携带题目列表
    pub fn supports_questions(&self) -> bool {
        matches!(self, AssignmentKind::Test | AssignmentKind::Quiz)
    }
}

impl<'de> Deserialize<'de> for AssignmentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            AssignmentKind::TEST => Ok(AssignmentKind::Test),
            AssignmentKind::PRACTICAL => Ok(AssignmentKind::Practical),
            AssignmentKind::PROJECT => Ok(AssignmentKind::Project),
            AssignmentKind::QUIZ => Ok(AssignmentKind::Quiz),
            _ => Err(serde::de::Error::custom(format!(
                "无效的作业类型: '{s}'. 支持的类型: test, practical, project, quiz"
            ))),
        }
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentKind::Test => write!(f, "{}", AssignmentKind::TEST),
            AssignmentKind::Practical => write!(f, "{}", AssignmentKind::PRACTICAL),
            AssignmentKind::Project => write!(f, "{}", AssignmentKind::PROJECT),
            AssignmentKind::Quiz => write!(f, "{}", AssignmentKind::QUIZ),
        }
    }
}

impl std::str::FromStr for AssignmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(AssignmentKind::Test),
            "practical" => Ok(AssignmentKind::Practical),
            "project" => Ok(AssignmentKind::Project),
            "quiz" => Ok(AssignmentKind::Quiz),
            _ => Err(format!("Invalid assignment kind: {s}")),
        }
    }
}

// 题目类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum QuestionKind {
    SingleChoice,
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    LongAnswer,
}

impl QuestionKind {
    /// 是否为选择类题目（必须携带选项）
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionKind::SingleChoice | QuestionKind::MultipleChoice | QuestionKind::TrueFalse
        )
    }
}

/// 选择题选项，顺序即展示顺序
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct QuestionOption {
    pub text: String,
    pub is_correct: bool,
}

/// 题目，顺序即展示顺序
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Question {
    pub text: String,
    pub kind: QuestionKind,
    pub points: f64,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub kind: AssignmentKind,
    pub max_score: f64,
    /// 及格线，满分的百分比（0-100）
    pub passing_score: f64,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    /// 限时（分钟），仅作为客户端提示存储，服务端不计时
    pub time_limit_minutes: Option<i32>,
    pub max_attempts: Option<i32>,
    pub questions: Option<Vec<Question>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            AssignmentKind::Test,
            AssignmentKind::Practical,
            AssignmentKind::Project,
            AssignmentKind::Quiz,
        ] {
            assert_eq!(AssignmentKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn test_questions_only_for_test_and_quiz() {
        assert!(AssignmentKind::Test.supports_questions());
        assert!(AssignmentKind::Quiz.supports_questions());
        assert!(!AssignmentKind::Practical.supports_questions());
        assert!(!AssignmentKind::Project.supports_questions());
    }

    #[test]
    fn test_question_kind_choice() {
        assert!(QuestionKind::SingleChoice.is_choice());
        assert!(QuestionKind::MultipleChoice.is_choice());
        assert!(QuestionKind::TrueFalse.is_choice());
        assert!(!QuestionKind::ShortAnswer.is_choice());
        assert!(!QuestionKind::LongAnswer.is_choice());
    }

    #[test]
    fn test_question_json_roundtrip() {
        let q = Question {
            text: "1 + 1 = 2 ?".to_string(),
            kind: QuestionKind::TrueFalse,
            points: 2.0,
            options: vec![
                QuestionOption {
                    text: "true".to_string(),
                    is_correct: true,
                },
                QuestionOption {
                    text: "false".to_string(),
                    is_correct: false,
                },
            ],
        };
        let json = serde_json::to_string(&q).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, QuestionKind::TrueFalse);
        assert_eq!(back.options.len(), 2);
        assert!(back.options[0].is_correct);
    }
}
