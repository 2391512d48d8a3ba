use serde::{Deserialize, Serialize};
use validator::Validate;

use super::question::{NUMERIC_INPUT_MAX, NUMERIC_INPUT_MIN};

/// What the presentation layer hands back: a selected choice or typed text,
/// or an already-parsed number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedAnswer {
    Number(i64),
    Text(String),
}

impl From<&str> for SubmittedAnswer {
    fn from(value: &str) -> Self {
        SubmittedAnswer::Text(value.to_string())
    }
}

impl From<String> for SubmittedAnswer {
    fn from(value: String) -> Self {
        SubmittedAnswer::Text(value)
    }
}

impl From<i64> for SubmittedAnswer {
    fn from(value: i64) -> Self {
        SubmittedAnswer::Number(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Bounds check for the numeric answer box. Advisory only: the evaluator
/// accepts any integer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NumericAnswerInput {
    #[validate(range(
        min = NUMERIC_INPUT_MIN,
        max = NUMERIC_INPUT_MAX,
        message = "Answer must be between 0 and 20"
    ))]
    pub value: i64,
}

/// Result of `QuizSession::submit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub verdict: Verdict,
    pub points_awarded: u32,
    pub total_score: u32,
    pub current_streak: u32,
    pub level: u32,
    pub leveled_up: bool,
    pub feedback: String,
}
