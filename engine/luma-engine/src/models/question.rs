use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Domain;

/// Recommended UI bounds for the numeric answer box
pub const NUMERIC_INPUT_MIN: i64 = 0;
pub const NUMERIC_INPUT_MAX: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    Counting,
    Addition,
    Subtraction,
    IdentifyLetter,
    IdentifyWord,
    MatchLetterWord,
}

impl QuestionKind {
    pub fn domain(self) -> Domain {
        match self {
            QuestionKind::Counting | QuestionKind::Addition | QuestionKind::Subtraction => {
                Domain::Math
            }
            QuestionKind::IdentifyLetter
            | QuestionKind::IdentifyWord
            | QuestionKind::MatchLetterWord => Domain::Alphabet,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Counting => "counting",
            QuestionKind::Addition => "addition",
            QuestionKind::Subtraction => "subtraction",
            QuestionKind::IdentifyLetter => "identify-letter",
            QuestionKind::IdentifyWord => "identify-word",
            QuestionKind::MatchLetterWord => "match-letter-word",
        }
    }
}

/// How the learner answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerInput {
    Choices { options: Vec<String> },
    Numeric { min: i64, max: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathVisual {
    pub glyph: String,
    pub left_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphabetVisual {
    pub letter: char,
    pub word: String,
    pub emoji: String,
    pub speech: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionVisual {
    Math(MathVisual),
    Alphabet(AlphabetVisual),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphMark {
    Kept,
    Removed,
}

/// One generated question. Never mutated after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub level: u32,
    pub kind: QuestionKind,
    pub prompt: String,
    pub input: AnswerInput,
    pub correct_answer: CorrectAnswer,
    pub visual: QuestionVisual,
}

impl Question {
    pub fn domain(&self) -> Domain {
        self.kind.domain()
    }

    pub fn options(&self) -> Option<&[String]> {
        match &self.input {
            AnswerInput::Choices { options } => Some(options),
            AnswerInput::Numeric { .. } => None,
        }
    }

    pub fn speech(&self) -> Option<&str> {
        match &self.visual {
            QuestionVisual::Alphabet(visual) => Some(&visual.speech),
            QuestionVisual::Math(_) => None,
        }
    }

    /// Per-glyph display marks for math questions.
    ///
    /// Subtraction shows `total` glyphs where index `>= answer` is drawn as
    /// removed. This is a display convention only: it does not identify which
    /// items were taken away. Addition lists the left group then the right group.
    pub fn glyph_marks(&self) -> Vec<GlyphMark> {
        let QuestionVisual::Math(visual) = &self.visual else {
            return Vec::new();
        };

        match (self.kind, &self.correct_answer) {
            (QuestionKind::Subtraction, CorrectAnswer::Number(answer)) => {
                let kept = u32::try_from(*answer).unwrap_or(0);
                (0..visual.left_count)
                    .map(|i| {
                        if i >= kept {
                            GlyphMark::Removed
                        } else {
                            GlyphMark::Kept
                        }
                    })
                    .collect()
            }
            _ => {
                let total = visual.left_count + visual.right_count.unwrap_or(0);
                vec![GlyphMark::Kept; total as usize]
            }
        }
    }
}
