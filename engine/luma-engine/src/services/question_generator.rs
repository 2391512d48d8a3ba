use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use uuid::Uuid;

use crate::errors::GenerationError;
use crate::metrics::QUESTIONS_GENERATED_TOTAL;
use crate::models::catalog::{alphabet_pool, AlphabetItem, ALPHABET, MATH_GLYPHS};
use crate::models::question::{
    AlphabetVisual, AnswerInput, CorrectAnswer, MathVisual, Question, QuestionKind,
    QuestionVisual, NUMERIC_INPUT_MAX, NUMERIC_INPUT_MIN,
};
use crate::models::Domain;

pub const DISTRACTOR_COUNT: usize = 3;

/// Operands of a math question, drawn before the question is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOperands {
    Counting { count: u32 },
    Addition { left: u32, right: u32 },
    Subtraction { total: u32, subtract: u32 },
}

impl MathOperands {
    pub fn kind(self) -> QuestionKind {
        match self {
            MathOperands::Counting { .. } => QuestionKind::Counting,
            MathOperands::Addition { .. } => QuestionKind::Addition,
            MathOperands::Subtraction { .. } => QuestionKind::Subtraction,
        }
    }

    pub fn result(self) -> i64 {
        match self {
            MathOperands::Counting { count } => i64::from(count),
            MathOperands::Addition { left, right } => i64::from(left) + i64::from(right),
            MathOperands::Subtraction { total, subtract } => {
                i64::from(total) - i64::from(subtract)
            }
        }
    }
}

/// Builds questions for either mini-game from an injected random source.
///
/// Pass a seeded `StdRng` to replay a session deterministically.
pub struct QuestionGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> QuestionGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self, domain: Domain, level: u32) -> Result<Question, GenerationError> {
        // levels start at 1
        let level = level.max(1);
        let question = match domain {
            Domain::Math => self.math_question(level),
            Domain::Alphabet => self.alphabet_question(level)?,
        };

        QUESTIONS_GENERATED_TOTAL
            .with_label_values(&[domain.as_str(), question.kind.as_str()])
            .inc();

        tracing::debug!(
            "Generated question: id={}, domain={}, kind={}, level={}",
            question.id,
            domain.as_str(),
            question.kind.as_str(),
            level
        );

        Ok(question)
    }

    pub fn math_question(&mut self, level: u32) -> Question {
        let operands = self.math_operands(level);
        let glyph = MATH_GLYPHS[self.rng.random_range(0..MATH_GLYPHS.len())];
        let id = self.next_id();
        build_math_question(id, level, operands, glyph)
    }

    /// Level 1 counts, level 2 adds, every level from 3 up subtracts
    pub fn math_operands(&mut self, level: u32) -> MathOperands {
        match level {
            0 | 1 => MathOperands::Counting {
                count: self.rng.random_range(1..=5),
            },
            2 => MathOperands::Addition {
                left: self.rng.random_range(1..=4),
                right: self.rng.random_range(1..=4),
            },
            _ => {
                let total = self.rng.random_range(4..=9);
                MathOperands::Subtraction {
                    total,
                    subtract: self.rng.random_range(1..total),
                }
            }
        }
    }

    pub fn alphabet_question(&mut self, level: u32) -> Result<Question, GenerationError> {
        let target = *alphabet_pool(level)
            .choose(&mut self.rng)
            .ok_or(GenerationError::EmptyCatalog)?;
        self.alphabet_question_for(level, &target)
    }

    /// Alphabet question about a fixed target; distractors and order stay random
    pub fn alphabet_question_for(
        &mut self,
        level: u32,
        target: &AlphabetItem,
    ) -> Result<Question, GenerationError> {
        let kind = alphabet_kind(level);
        let distractors: Vec<&AlphabetItem> =
            sample_distractors(&ALPHABET, target, DISTRACTOR_COUNT, &mut self.rng)?;

        let mut options: Vec<String> = std::iter::once(target)
            .chain(distractors)
            .map(|item| alphabet_option(kind, item))
            .collect();
        options.shuffle(&mut self.rng);

        let prompt = match kind {
            QuestionKind::IdentifyLetter => format!("Which letter does {} start with?", target.word),
            QuestionKind::IdentifyWord => {
                format!("Which word starts with the letter {}?", target.letter)
            }
            _ => "Match the letter with the correct word:".to_string(),
        };

        Ok(Question {
            id: self.next_id(),
            level,
            kind,
            prompt,
            input: AnswerInput::Choices { options },
            correct_answer: CorrectAnswer::Text(alphabet_option(kind, target)),
            visual: QuestionVisual::Alphabet(AlphabetVisual {
                letter: target.letter,
                word: target.word.to_string(),
                emoji: target.emoji.to_string(),
                speech: target.speech(),
            }),
        })
    }

    fn next_id(&mut self) -> Uuid {
        uuid::Builder::from_random_bytes(self.rng.random()).into_uuid()
    }
}

pub fn build_math_question(id: Uuid, level: u32, operands: MathOperands, glyph: &str) -> Question {
    let (prompt, left_count, right_count) = match operands {
        MathOperands::Counting { count } => {
            (format!("How many {} do you see?", glyph), count, None)
        }
        MathOperands::Addition { left, right } => (
            format!("Count all the {}. What is {} + {}?", glyph, left, right),
            left,
            Some(right),
        ),
        MathOperands::Subtraction { total, subtract } => (
            format!(
                "Start with {} {}, take away {}. How many are left?",
                total, glyph, subtract
            ),
            total,
            Some(subtract),
        ),
    };

    Question {
        id,
        level,
        kind: operands.kind(),
        prompt,
        input: AnswerInput::Numeric {
            min: NUMERIC_INPUT_MIN,
            max: NUMERIC_INPUT_MAX,
        },
        correct_answer: CorrectAnswer::Number(operands.result()),
        visual: QuestionVisual::Math(MathVisual {
            glyph: glyph.to_string(),
            left_count,
            right_count,
        }),
    }
}

fn alphabet_kind(level: u32) -> QuestionKind {
    match level {
        0 | 1 => QuestionKind::IdentifyLetter,
        2 => QuestionKind::IdentifyWord,
        _ => QuestionKind::MatchLetterWord,
    }
}

fn alphabet_option(kind: QuestionKind, item: &AlphabetItem) -> String {
    match kind {
        QuestionKind::IdentifyLetter => item.letter.to_string(),
        QuestionKind::IdentifyWord => item.word.to_string(),
        _ => item.pairing(),
    }
}

/// Picks `count` distinct items other than `target` from the whole catalog.
/// Fails rather than returning fewer choices.
pub fn sample_distractors<'a, R: Rng + ?Sized>(
    catalog: &'a [AlphabetItem],
    target: &AlphabetItem,
    count: usize,
    rng: &mut R,
) -> Result<Vec<&'a AlphabetItem>, GenerationError> {
    let alternatives: Vec<&AlphabetItem> = catalog
        .iter()
        .filter(|item| item.letter != target.letter)
        .collect();

    if alternatives.len() < count {
        return Err(GenerationError::InsufficientDistractors {
            target: target.letter,
            needed: count,
            available: alternatives.len(),
        });
    }

    Ok(alternatives.choose_multiple(rng, count).copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::find_letter;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn generator(seed: u64) -> QuestionGenerator<StdRng> {
        QuestionGenerator::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn operands_stay_in_range_per_level() {
        let mut questions = generator(1);
        for _ in 0..500 {
            match questions.math_operands(1) {
                MathOperands::Counting { count } => assert!((1..=5).contains(&count)),
                other => panic!("unexpected operands {:?}", other),
            }
            match questions.math_operands(2) {
                MathOperands::Addition { left, right } => {
                    assert!((1..=4).contains(&left));
                    assert!((1..=4).contains(&right));
                }
                other => panic!("unexpected operands {:?}", other),
            }
            match questions.math_operands(7) {
                MathOperands::Subtraction { total, subtract } => {
                    assert!((4..=9).contains(&total));
                    assert!(subtract >= 1 && subtract < total);
                }
                other => panic!("unexpected operands {:?}", other),
            }
        }
    }

    #[test]
    fn addition_three_plus_four() {
        let operands = MathOperands::Addition { left: 3, right: 4 };
        let q = build_math_question(Uuid::nil(), 2, operands, "🐝");
        assert_eq!(q.kind, QuestionKind::Addition);
        assert_eq!(q.correct_answer, CorrectAnswer::Number(7));
        assert_eq!(q.prompt, "Count all the 🐝. What is 3 + 4?");
    }

    #[test]
    fn alphabet_kind_by_level() {
        assert_eq!(alphabet_kind(1), QuestionKind::IdentifyLetter);
        assert_eq!(alphabet_kind(2), QuestionKind::IdentifyWord);
        assert_eq!(alphabet_kind(3), QuestionKind::MatchLetterWord);
        assert_eq!(alphabet_kind(40), QuestionKind::MatchLetterWord);
    }

    #[test]
    fn distractors_exclude_target_and_are_distinct() {
        let mut rng = StdRng::seed_from_u64(9);
        let target = find_letter('C').unwrap();
        for _ in 0..200 {
            let picked = sample_distractors(&ALPHABET, target, 3, &mut rng).unwrap();
            let letters: HashSet<char> = picked.iter().map(|i| i.letter).collect();
            assert_eq!(letters.len(), 3);
            assert!(!letters.contains(&'C'));
        }
    }

    #[test]
    fn too_small_catalog_is_an_error() {
        let mut rng = StdRng::seed_from_u64(9);
        let tiny = &ALPHABET[..3];
        let err = sample_distractors(tiny, &tiny[0], 3, &mut rng).unwrap_err();
        assert_eq!(
            err,
            GenerationError::InsufficientDistractors {
                target: 'A',
                needed: 3,
                available: 2,
            }
        );
    }

    #[test]
    fn level_one_distractors_reach_past_the_pool() {
        let mut questions = generator(5);
        let pool: HashSet<char> = alphabet_pool(1).iter().map(|i| i.letter).collect();
        let target = find_letter('C').unwrap();
        let mut outside = HashSet::new();
        for _ in 0..100 {
            let q = questions.alphabet_question_for(1, target).unwrap();
            for option in q.options().unwrap() {
                let letter = option.chars().next().unwrap();
                if !pool.contains(&letter) {
                    outside.insert(letter);
                }
            }
        }
        assert!(!outside.is_empty());
    }

    #[test]
    fn match_level_formats_pairings() {
        let mut questions = generator(3);
        let target = find_letter('D').unwrap();
        let q = questions.alphabet_question_for(5, target).unwrap();
        assert_eq!(q.correct_answer, CorrectAnswer::Text("D - Dog".to_string()));
        assert!(q.options().unwrap().iter().all(|o| o.contains(" - ")));
    }

    #[test]
    fn seeded_generators_replay() {
        let a = generator(11).generate(Domain::Alphabet, 2).unwrap();
        let b = generator(11).generate(Domain::Alphabet, 2).unwrap();
        assert_eq!(a, b);
    }
}
