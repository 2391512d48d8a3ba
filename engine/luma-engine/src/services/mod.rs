pub mod answer_service;
pub mod progress_service;
pub mod question_generator;
pub mod session_service;

pub use answer_service::{evaluate, feedback_message};
pub use progress_service::{CorrectOutcome, LevelUp, ProgressTracker};
pub use question_generator::{build_math_question, MathOperands, QuestionGenerator};
pub use session_service::QuizSession;
