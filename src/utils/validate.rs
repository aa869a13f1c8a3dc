use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::assignments::entities::{Question, QuestionKind};

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：5 <= x <= 16
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    // 用户名格式校验：只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 评分校验：分数必须是 [0, max_score] 内的有限数
pub fn validate_score(score: f64, max_score: f64) -> Result<(), String> {
    if !score.is_finite() {
        return Err("Score must be a finite number".to_string());
    }
    if score < 0.0 {
        return Err("Score must not be negative".to_string());
    }
    if score > max_score {
        return Err(format!(
            "Score {score} exceeds the assignment maximum of {max_score}"
        ));
    }
    Ok(())
}

/// 作业满分与及格线校验
pub fn validate_score_bounds(max_score: f64, passing_score: f64) -> Result<(), String> {
    if !max_score.is_finite() || max_score <= 0.0 {
        return Err("Maximum score must be a positive finite number".to_string());
    }
    if !passing_score.is_finite() || !(0.0..=100.0).contains(&passing_score) {
        return Err("Passing score must be a percentage between 0 and 100".to_string());
    }
    Ok(())
}

/// 题目结构校验
///
/// - 每题分值必须为正的有限数
/// - 单选 / 判断题恰好一个正确选项，判断题恰好两个选项
/// - 多选题至少一个正确选项
/// - 简答 / 论述题不允许携带选项
pub fn validate_questions(questions: &[Question]) -> Result<(), String> {
    if questions.is_empty() {
        return Err("Question list must not be empty".to_string());
    }

    for (index, question) in questions.iter().enumerate() {
        let number = index + 1;

        if question.text.trim().is_empty() {
            return Err(format!("Question {number}: text must not be empty"));
        }

        if !question.points.is_finite() || question.points <= 0.0 {
            return Err(format!("Question {number}: points must be positive"));
        }

        if question.kind.is_choice() {
            if question.options.len() < 2 {
                return Err(format!(
                    "Question {number}: choice questions need at least 2 options"
                ));
            }

            let correct = question.options.iter().filter(|o| o.is_correct).count();
            match question.kind {
                QuestionKind::SingleChoice | QuestionKind::TrueFalse => {
                    if correct != 1 {
                        return Err(format!(
                            "Question {number}: exactly one option must be correct"
                        ));
                    }
                }
                QuestionKind::MultipleChoice => {
                    if correct == 0 {
                        return Err(format!(
                            "Question {number}: at least one option must be correct"
                        ));
                    }
                }
                _ => {}
            }

            if question.kind == QuestionKind::TrueFalse && question.options.len() != 2 {
                return Err(format!(
                    "Question {number}: true/false questions must have exactly 2 options"
                ));
            }
        } else if !question.options.is_empty() {
            return Err(format!(
                "Question {number}: free-text questions must not carry options"
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::QuestionOption;

    fn option(text: &str, is_correct: bool) -> QuestionOption {
        QuestionOption {
            text: text.to_string(),
            is_correct,
        }
    }

    fn question(kind: QuestionKind, points: f64, options: Vec<QuestionOption>) -> Question {
        Question {
            text: "What does the borrow checker enforce?".to_string(),
            kind,
            points,
            options,
        }
    }

    #[test]
    fn test_valid_username() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("bob").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("learner@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_score_within_bounds() {
        assert!(validate_score(0.0, 100.0).is_ok());
        assert!(validate_score(95.0, 100.0).is_ok());
        assert!(validate_score(100.0, 100.0).is_ok());
    }

    #[test]
    fn test_score_exceeding_max_rejected() {
        assert!(validate_score(150.0, 100.0).is_err());
    }

    #[test]
    fn test_negative_and_non_finite_scores_rejected() {
        assert!(validate_score(-1.0, 100.0).is_err());
        assert!(validate_score(f64::NAN, 100.0).is_err());
        assert!(validate_score(f64::INFINITY, 100.0).is_err());
    }

    #[test]
    fn test_score_bounds() {
        assert!(validate_score_bounds(100.0, 60.0).is_ok());
        assert!(validate_score_bounds(0.0, 60.0).is_err());
        assert!(validate_score_bounds(100.0, 120.0).is_err());
    }

    #[test]
    fn test_single_choice_needs_one_correct() {
        let ok = question(
            QuestionKind::SingleChoice,
            5.0,
            vec![option("a", true), option("b", false)],
        );
        assert!(validate_questions(&[ok]).is_ok());

        let two_correct = question(
            QuestionKind::SingleChoice,
            5.0,
            vec![option("a", true), option("b", true)],
        );
        assert!(validate_questions(&[two_correct]).is_err());
    }

    #[test]
    fn test_true_false_needs_two_options() {
        let three = question(
            QuestionKind::TrueFalse,
            2.0,
            vec![option("true", true), option("false", false), option("?", false)],
        );
        assert!(validate_questions(&[three]).is_err());
    }

    #[test]
    fn test_multiple_choice_needs_any_correct() {
        let none_correct = question(
            QuestionKind::MultipleChoice,
            5.0,
            vec![option("a", false), option("b", false)],
        );
        assert!(validate_questions(&[none_correct]).is_err());
    }

    #[test]
    fn test_free_text_rejects_options() {
        let with_options = question(QuestionKind::ShortAnswer, 10.0, vec![option("a", true)]);
        assert!(validate_questions(&[with_options]).is_err());

        let clean = question(QuestionKind::LongAnswer, 10.0, vec![]);
        assert!(validate_questions(&[clean]).is_ok());
    }

    #[test]
    fn test_non_positive_points_rejected() {
        let zero = question(QuestionKind::ShortAnswer, 0.0, vec![]);
        assert!(validate_questions(&[zero]).is_err());
    }
}
