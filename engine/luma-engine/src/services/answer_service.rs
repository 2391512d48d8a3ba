use crate::models::answer::{SubmittedAnswer, Verdict};
use crate::models::question::{CorrectAnswer, Question};
use crate::models::Domain;

/// Compares a submission with the question's answer.
///
/// Numeric questions parse text input as an integer; empty or unparseable
/// input is simply incorrect. Choice questions compare the trimmed text.
pub fn evaluate(question: &Question, submitted: &SubmittedAnswer) -> Verdict {
    let is_correct = match (&question.correct_answer, submitted) {
        (CorrectAnswer::Number(expected), SubmittedAnswer::Number(given)) => expected == given,
        (CorrectAnswer::Number(expected), SubmittedAnswer::Text(raw)) => raw
            .trim()
            .parse::<i64>()
            .map(|given| given == *expected)
            .unwrap_or(false),
        (CorrectAnswer::Text(expected), SubmittedAnswer::Text(raw)) => {
            !raw.trim().is_empty() && raw.trim() == expected.trim()
        }
        (CorrectAnswer::Text(_), SubmittedAnswer::Number(_)) => false,
    };

    tracing::debug!(
        "Answer evaluated: question={}, kind={}, correct={}",
        question.id,
        question.kind.as_str(),
        is_correct
    );

    if is_correct {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// Mascot feedback line shown under the question
pub fn feedback_message(domain: Domain, verdict: Verdict) -> &'static str {
    match (domain, verdict) {
        (Domain::Math, Verdict::Correct) => "Great job! 🎉",
        (Domain::Math, Verdict::Incorrect) => "Try again! You can do it! 💪",
        (Domain::Alphabet, Verdict::Correct) => "Excellent! 🎉",
        (Domain::Alphabet, Verdict::Incorrect) => "Try again! You're learning! 📚",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{AlphabetVisual, AnswerInput, QuestionKind, QuestionVisual};
    use crate::services::question_generator::{build_math_question, MathOperands};
    use uuid::Uuid;

    fn seven() -> Question {
        build_math_question(
            Uuid::nil(),
            2,
            MathOperands::Addition { left: 3, right: 4 },
            "🍓",
        )
    }

    fn letter_c() -> Question {
        Question {
            id: Uuid::nil(),
            level: 1,
            kind: QuestionKind::IdentifyLetter,
            prompt: "Which letter does Cat start with?".to_string(),
            input: AnswerInput::Choices {
                options: vec!["A".into(), "C".into(), "F".into(), "Q".into()],
            },
            correct_answer: CorrectAnswer::Text("C".to_string()),
            visual: QuestionVisual::Alphabet(AlphabetVisual {
                letter: 'C',
                word: "Cat".to_string(),
                emoji: "🐱".to_string(),
                speech: "C for Cat".to_string(),
            }),
        }
    }

    #[test]
    fn numeric_text_is_parsed() {
        let q = seven();
        assert_eq!(evaluate(&q, &"7".into()), Verdict::Correct);
        assert_eq!(evaluate(&q, &" 7 ".into()), Verdict::Correct);
        assert_eq!(evaluate(&q, &"6".into()), Verdict::Incorrect);
        assert_eq!(evaluate(&q, &7i64.into()), Verdict::Correct);
    }

    #[test]
    fn unparseable_numeric_input_is_incorrect() {
        let q = seven();
        for raw in ["", "  ", "seven", "7.0", "7abc"] {
            assert_eq!(evaluate(&q, &raw.into()), Verdict::Incorrect, "input {:?}", raw);
        }
    }

    #[test]
    fn out_of_range_numbers_are_just_compared() {
        let q = seven();
        assert_eq!(evaluate(&q, &(-7i64).into()), Verdict::Incorrect);
        assert_eq!(evaluate(&q, &"1000".into()), Verdict::Incorrect);
    }

    #[test]
    fn choice_comparison() {
        let q = letter_c();
        assert_eq!(evaluate(&q, &"C".into()), Verdict::Correct);
        assert_eq!(evaluate(&q, &"F".into()), Verdict::Incorrect);
        assert_eq!(evaluate(&q, &"".into()), Verdict::Incorrect);
        assert_eq!(evaluate(&q, &3i64.into()), Verdict::Incorrect);
    }

    #[test]
    fn feedback_lines_per_domain() {
        assert_eq!(feedback_message(Domain::Math, Verdict::Correct), "Great job! 🎉");
        assert_eq!(
            feedback_message(Domain::Alphabet, Verdict::Incorrect),
            "Try again! You're learning! 📚"
        );
    }
}
