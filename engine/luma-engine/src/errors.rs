use thiserror::Error;

/// A question could not be built from the catalog. Unreachable with the
/// built-in catalogs; indicates a broken catalog invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("need {needed} distractors for '{target}' but only {available} alternatives exist")]
    InsufficientDistractors {
        target: char,
        needed: usize,
        available: usize,
    },

    #[error("item catalog is empty")]
    EmptyCatalog,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("an answer is already being resolved, wait for the next question")]
    AdvancePending,

    #[error("session {0} is closed")]
    Closed(uuid::Uuid),

    #[error("no Tokio runtime to schedule the next question")]
    NoRuntime,

    #[error(transparent)]
    Generation(#[from] GenerationError),
}
