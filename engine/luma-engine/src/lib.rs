pub mod config;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod services;
pub mod telemetry;

pub use config::Config;
pub use errors::{GenerationError, SessionError};
pub use models::answer::{SubmittedAnswer, Verdict};
pub use models::question::Question;
pub use models::{Domain, ProgressionState};
pub use services::{evaluate, ProgressTracker, QuestionGenerator, QuizSession};
