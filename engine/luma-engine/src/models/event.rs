use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer::Verdict;
use super::question::Question;
use super::ProgressionState;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SessionEvent {
    QuestionReady(QuestionReady),
    AnswerFeedback(AnswerFeedback),
    LevelUp(LevelUpCelebration),
    SessionClosed(SessionClosed),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QuestionReady {
    pub session_id: Uuid,
    pub question: Question,
    /// Set when sound is enabled and the question has something to read aloud
    pub speak: Option<String>,
    /// True when the previous question is offered again after a wrong answer
    pub retry: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnswerFeedback {
    pub session_id: Uuid,
    pub question_id: Uuid,
    pub verdict: Verdict,
    pub points_awarded: u32,
    pub message: String,
    pub state: ProgressionState,
    pub timestamp: DateTime<Utc>,
}

/// Level-up banner window. Expires on its own; the tracker is not involved.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LevelUpCelebration {
    pub session_id: Uuid,
    pub level: u32,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClosed {
    pub session_id: Uuid,
    pub final_state: ProgressionState,
    pub timestamp: DateTime<Utc>,
}

impl LevelUpCelebration {
    pub fn new(session_id: Uuid, level: u32, started_at: DateTime<Utc>, lasts: Duration) -> Self {
        Self {
            session_id,
            level,
            started_at,
            expires_at: started_at + lasts,
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now >= self.started_at && now < self.expires_at
    }
}

impl SessionEvent {
    pub fn to_event_data(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            SessionEvent::QuestionReady(_) => "question-ready",
            SessionEvent::AnswerFeedback(_) => "answer-feedback",
            SessionEvent::LevelUp(_) => "level-up",
            SessionEvent::SessionClosed(_) => "session-closed",
        }
    }
}
