use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::{GenerationError, SessionError};
use crate::metrics::{ANSWERS_SUBMITTED_TOTAL, SESSIONS_ACTIVE, SESSIONS_TOTAL};
use crate::models::answer::{SubmissionResult, SubmittedAnswer, Verdict};
use crate::models::event::{
    AnswerFeedback, LevelUpCelebration, QuestionReady, SessionClosed, SessionEvent,
};
use crate::models::question::Question;
use crate::models::{Domain, ProgressSummary, ProgressionState};

use super::answer_service::{evaluate, feedback_message};
use super::progress_service::ProgressTracker;
use super::question_generator::QuestionGenerator;

const EVENT_CHANNEL_CAPACITY: usize = 64;

struct PendingAdvance {
    verdict: Verdict,
    handle: JoinHandle<()>,
}

struct SessionState {
    generator: QuestionGenerator<StdRng>,
    tracker: ProgressTracker,
    current: Question,
    pending: Option<PendingAdvance>,
    celebration: Option<LevelUpCelebration>,
    closed: bool,
}

#[derive(Clone)]
struct SessionContext {
    id: Uuid,
    domain: Domain,
    advance_delay: Duration,
    celebration: chrono::Duration,
    sound_enabled: bool,
    events: broadcast::Sender<SessionEvent>,
}

/// One learner playing one mini-game.
///
/// Every submission schedules exactly one pending advance; until it fires
/// further submissions are rejected. A correct answer advances to a fresh
/// question at the current level, a wrong one re-offers the same question.
/// Closing (or dropping) the session cancels the pending advance.
///
/// `submit` spawns the advance timer on the current Tokio runtime and fails
/// with `SessionError::NoRuntime` outside one.
pub struct QuizSession {
    ctx: SessionContext,
    state: Arc<Mutex<SessionState>>,
}

impl QuizSession {
    pub fn new(domain: Domain, config: &Config) -> Result<Self, SessionError> {
        Self::with_rng(domain, config, config.rng())
    }

    pub fn with_rng(domain: Domain, config: &Config, rng: StdRng) -> Result<Self, SessionError> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let ctx = SessionContext {
            id: Uuid::new_v4(),
            domain,
            advance_delay: config.advance_delay(),
            celebration: config.celebration_duration(),
            sound_enabled: config.sound_enabled,
            events,
        };

        let mut generator = QuestionGenerator::new(rng);
        let tracker = ProgressTracker::new(domain);
        let current = generator.generate(domain, tracker.state().level)?;

        SESSIONS_TOTAL.with_label_values(&["created"]).inc();
        SESSIONS_ACTIVE.inc();

        tracing::info!(
            "Session created: {} domain={}",
            ctx.id,
            domain.as_str()
        );

        Ok(Self {
            ctx,
            state: Arc::new(Mutex::new(SessionState {
                generator,
                tracker,
                current,
                pending: None,
                celebration: None,
                closed: false,
            })),
        })
    }

    pub fn id(&self) -> Uuid {
        self.ctx.id
    }

    pub fn domain(&self) -> Domain {
        self.ctx.domain
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.ctx.events.subscribe()
    }

    pub fn current_question(&self) -> Question {
        lock(&self.state).current.clone()
    }

    pub fn progress(&self) -> ProgressionState {
        lock(&self.state).tracker.state()
    }

    pub fn summary(&self) -> ProgressSummary {
        lock(&self.state).tracker.summary()
    }

    /// Whether submissions are currently disabled waiting for the advance
    pub fn is_advance_pending(&self) -> bool {
        lock(&self.state).pending.is_some()
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.state).closed
    }

    /// The level-up banner, if one is showing at `now`
    pub fn celebration(&self, now: DateTime<Utc>) -> Option<LevelUpCelebration> {
        lock(&self.state)
            .celebration
            .as_ref()
            .filter(|banner| banner.is_active(now))
            .cloned()
    }

    pub fn submit(
        &self,
        answer: impl Into<SubmittedAnswer>,
    ) -> Result<SubmissionResult, SessionError> {
        let answer = answer.into();
        let mut state = lock(&self.state);

        if state.closed {
            return Err(SessionError::Closed(self.ctx.id));
        }
        if state.pending.is_some() {
            tracing::debug!("Submission ignored, advance pending: session={}", self.ctx.id);
            return Err(SessionError::AdvancePending);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            tracing::warn!("Submission rejected: session={}, error={}", self.ctx.id, e);
            SessionError::NoRuntime
        })?;

        let verdict = evaluate(&state.current, &answer);
        let correct_label = if verdict.is_correct() { "true" } else { "false" };
        ANSWERS_SUBMITTED_TOTAL
            .with_label_values(&[self.ctx.domain.as_str(), correct_label])
            .inc();

        let (points_awarded, level_up) = match verdict {
            Verdict::Correct => {
                let outcome = state.tracker.record_correct();
                (outcome.points_awarded, outcome.level_up)
            }
            Verdict::Incorrect => {
                state.tracker.record_wrong();
                (0, None)
            }
        };

        let progress = state.tracker.state();
        let now = Utc::now();
        let feedback = feedback_message(self.ctx.domain, verdict).to_string();

        self.ctx.emit(SessionEvent::AnswerFeedback(AnswerFeedback {
            session_id: self.ctx.id,
            question_id: state.current.id,
            verdict,
            points_awarded,
            message: feedback.clone(),
            state: progress,
            timestamp: now,
        }));

        if let Some(level_up) = level_up {
            let banner =
                LevelUpCelebration::new(self.ctx.id, level_up.to_level, now, self.ctx.celebration);
            state.celebration = Some(banner.clone());
            self.ctx.emit(SessionEvent::LevelUp(banner));
        }

        let handle = runtime.spawn(advance_after_delay(
            Arc::downgrade(&self.state),
            self.ctx.clone(),
        ));
        state.pending = Some(PendingAdvance { verdict, handle });

        tracing::info!(
            "Answer processed: session={}, correct={}, score={}, streak={}, level={}",
            self.ctx.id,
            verdict.is_correct(),
            progress.score,
            progress.streak,
            progress.level
        );

        Ok(SubmissionResult {
            verdict,
            points_awarded,
            total_score: progress.score,
            current_streak: progress.streak,
            level: progress.level,
            leveled_up: level_up.is_some(),
            feedback,
        })
    }

    /// Ends the session and cancels any pending advance. Idempotent.
    pub fn close(&self) {
        let mut state = lock(&self.state);
        if state.closed {
            return;
        }
        state.closed = true;

        if let Some(pending) = state.pending.take() {
            pending.handle.abort();
            tracing::debug!("Pending advance cancelled: session={}", self.ctx.id);
        }

        SESSIONS_TOTAL.with_label_values(&["closed"]).inc();
        SESSIONS_ACTIVE.dec();

        let final_state = state.tracker.state();
        self.ctx.emit(SessionEvent::SessionClosed(SessionClosed {
            session_id: self.ctx.id,
            final_state,
            timestamp: Utc::now(),
        }));

        tracing::info!(
            "Session closed: {} score={} level={}",
            self.ctx.id,
            final_state.score,
            final_state.level
        );
    }
}

impl Drop for QuizSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl SessionContext {
    fn emit(&self, event: SessionEvent) {
        // no subscribers is fine
        self.events.send(event).ok();
    }
}

async fn advance_after_delay(state: Weak<Mutex<SessionState>>, ctx: SessionContext) {
    tokio::time::sleep(ctx.advance_delay).await;

    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = lock(&state);
    if state.closed {
        return;
    }
    let Some(pending) = state.pending.take() else {
        return;
    };

    let level = state.tracker.state().level;
    let generator = &mut state.generator;
    let advance = next_advance(pending.verdict, || generator.generate(ctx.domain, level));
    let retry = match advance {
        Advance::Fresh(question) => {
            state.current = question;
            false
        }
        Advance::Retry => true,
        Advance::Stuck(e) => {
            tracing::error!(
                "Failed to generate next question, re-offering current: session={}, error={}",
                ctx.id,
                e
            );
            true
        }
    };

    let question = state.current.clone();
    let speak = if ctx.sound_enabled {
        question.speech().map(str::to_string)
    } else {
        None
    };

    ctx.emit(SessionEvent::QuestionReady(QuestionReady {
        session_id: ctx.id,
        question,
        speak,
        retry,
        timestamp: Utc::now(),
    }));
}

enum Advance {
    Fresh(Question),
    Retry,
    Stuck(GenerationError),
}

/// Wrong answers re-offer the current question; correct ones draw a fresh one
fn next_advance<F>(verdict: Verdict, generate: F) -> Advance
where
    F: FnOnce() -> Result<Question, GenerationError>,
{
    match verdict {
        Verdict::Incorrect => Advance::Retry,
        Verdict::Correct => match generate() {
            Ok(question) => Advance::Fresh(question),
            Err(e) => Advance::Stuck(e),
        },
    }
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::question_generator::{build_math_question, MathOperands};

    fn sample_question() -> Question {
        build_math_question(Uuid::nil(), 1, MathOperands::Counting { count: 3 }, "🍎")
    }

    #[test]
    fn wrong_answer_never_generates() {
        let advance = next_advance(Verdict::Incorrect, || panic!("generator called"));
        assert!(matches!(advance, Advance::Retry));
    }

    #[test]
    fn correct_answer_draws_fresh_question() {
        let advance = next_advance(Verdict::Correct, || Ok(sample_question()));
        match advance {
            Advance::Fresh(question) => assert_eq!(question.id, Uuid::nil()),
            _ => panic!("expected a fresh question"),
        }
    }

    #[test]
    fn generation_failure_is_not_a_fresh_question() {
        let advance = next_advance(Verdict::Correct, || Err(GenerationError::EmptyCatalog));
        assert!(matches!(
            advance,
            Advance::Stuck(GenerationError::EmptyCatalog)
        ));
    }

    #[test]
    fn submit_outside_runtime_is_rejected() {
        let config = Config {
            rng_seed: Some(42),
            ..Config::default()
        };
        let session = QuizSession::new(Domain::Math, &config).unwrap();
        let err = session.submit(-1i64).unwrap_err();
        assert!(matches!(err, SessionError::NoRuntime));
        assert_eq!(session.progress(), ProgressionState::default());
        assert!(!session.is_advance_pending());
    }
}
