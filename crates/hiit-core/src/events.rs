use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Phase;
use crate::workout::Activity;

/// Every phase transition produces an Event. The host drains them with
/// [`PhaseController::poll_events`](crate::engine::PhaseController::poll_events);
/// nothing in the engine blocks on a subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ReadyStarted {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    EffortStarted {
        iteration: u32,
        /// `None` for user-paced efforts: they end on `advance()`, not on
        /// a countdown.
        duration_secs: Option<u32>,
        at: DateTime<Utc>,
    },
    RestStarted {
        iteration: u32,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    Paused {
        remaining_secs: f64,
        at: DateTime<Utc>,
    },
    Resumed {
        remaining_secs: f64,
        at: DateTime<Utc>,
    },
    PhaseSkipped {
        phase: Phase,
        at: DateTime<Utc>,
    },
    /// Terminal event: the run completed or was abandoned. Fires exactly
    /// once per run.
    Completed {
        summary: CompletionSummary,
        at: DateTime<Utc>,
    },
}

/// What the navigation collaborator needs once a run ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionSummary {
    /// Enclosing session id, when the run came from a session.
    pub session_id: Option<String>,
    /// Resolved index of the completed activity (0 for standalone runs).
    pub activity_index: usize,
    /// The just-completed activity.
    pub activity: Activity,
}

impl CompletionSummary {
    /// Index the caller would run next when continuing the session.
    pub fn next_activity_index(&self) -> usize {
        self.activity_index + 1
    }
}
