use serde::{Deserialize, Serialize};

use crate::metrics::LEVEL_UPS_TOTAL;
use crate::models::{
    Domain, ProgressSummary, ProgressionState, EXCELLENT_ACCURACY, EXCELLENT_MIN_ANSWERS,
    ON_FIRE_STREAK,
};

/// Emitted by `record_correct` when the level changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub from_level: u32,
    pub to_level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectOutcome {
    pub points_awarded: u32,
    pub level_up: Option<LevelUp>,
}

/// Owns a session's `ProgressionState`.
///
/// Invariants kept by the two transitions:
/// `total_count >= correct_count`, `streak <= correct_count`, score never drops.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    domain: Domain,
    state: ProgressionState,
}

impl ProgressTracker {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            state: ProgressionState::default(),
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn state(&self) -> ProgressionState {
        self.state
    }

    pub fn record_correct(&mut self) -> CorrectOutcome {
        let state = &mut self.state;
        // points use the level the question was answered at
        let points_awarded = self.domain.points_per_correct(state.level);

        state.correct_count = state.correct_count.saturating_add(1);
        state.total_count = state.total_count.saturating_add(1);
        state.streak = state.streak.saturating_add(1);
        state.score = state.score.saturating_add(points_awarded);

        let level_up = if state.correct_count % self.domain.level_up_every() == 0 {
            let from_level = state.level;
            state.level = state.level.saturating_add(1);

            LEVEL_UPS_TOTAL
                .with_label_values(&[self.domain.as_str()])
                .inc();
            tracing::info!(
                "Level up: domain={}, level {} -> {}, score={}",
                self.domain.as_str(),
                from_level,
                state.level,
                state.score
            );

            Some(LevelUp {
                from_level,
                to_level: state.level,
            })
        } else {
            None
        };

        CorrectOutcome {
            points_awarded,
            level_up,
        }
    }

    pub fn record_wrong(&mut self) {
        self.state.total_count = self.state.total_count.saturating_add(1);
        self.state.streak = 0;
    }

    pub fn summary(&self) -> ProgressSummary {
        let every = self.domain.level_up_every();
        let progress_in_level = self.state.correct_count % every;
        let accuracy_percent = if self.state.total_count == 0 {
            0.0
        } else {
            f64::from(self.state.correct_count) / f64::from(self.state.total_count) * 100.0
        };

        ProgressSummary {
            domain: self.domain,
            state: self.state,
            wrong_count: self.state.total_count - self.state.correct_count,
            accuracy_percent,
            progress_in_level,
            answers_to_next_level: every - progress_in_level,
            on_fire: self.state.streak >= ON_FIRE_STREAK,
            excellent: accuracy_percent >= EXCELLENT_ACCURACY
                && self.state.total_count >= EXCELLENT_MIN_ANSWERS,
        }
    }
}
