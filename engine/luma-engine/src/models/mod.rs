use serde::{Deserialize, Serialize};

pub mod answer;
pub mod catalog;
pub mod event;
pub mod question;

/// Which mini-game a session plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Math,
    Alphabet,
}

impl Domain {
    /// Correct answers needed per level-up
    pub fn level_up_every(self) -> u32 {
        match self {
            Domain::Math => 5,
            Domain::Alphabet => 4,
        }
    }

    /// Points awarded for a correct answer at `level`
    pub fn points_per_correct(self, level: u32) -> u32 {
        let base: u32 = match self {
            Domain::Math => 10,
            Domain::Alphabet => 15,
        };
        base.saturating_mul(level)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Math => "math",
            Domain::Alphabet => "alphabet",
        }
    }
}

/// Session progress. Only `ProgressTracker` mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub level: u32,
    pub score: u32,
    pub correct_count: u32,
    pub total_count: u32,
    pub streak: u32,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            correct_count: 0,
            total_count: 0,
            streak: 0,
        }
    }
}

/// Read-only view for the progress panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub domain: Domain,
    pub state: ProgressionState,
    pub wrong_count: u32,
    pub accuracy_percent: f64,
    pub progress_in_level: u32,
    pub answers_to_next_level: u32,
    /// Streak of at least `ON_FIRE_STREAK`
    pub on_fire: bool,
    /// Accuracy of at least `EXCELLENT_ACCURACY` over `EXCELLENT_MIN_ANSWERS` or more
    pub excellent: bool,
}

pub const ON_FIRE_STREAK: u32 = 5;
pub const EXCELLENT_ACCURACY: f64 = 80.0;
pub const EXCELLENT_MIN_ANSWERS: u32 = 5;

impl ProgressSummary {
    /// Motivational banners shown under the progress panel
    pub fn messages(&self) -> Vec<&'static str> {
        let mut messages = Vec::new();
        if self.on_fire {
            messages.push("🔥 Amazing streak! You're on fire! 🔥");
        }
        if self.excellent {
            messages.push("🌟 Excellent work! Keep it up! 🌟");
        }
        messages
    }
}
