//! Execution context: what a run operates on.

use serde::{Deserialize, Serialize};

use crate::workout::{Activity, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Ready,
    Effort,
    Rest,
    Done,
}

/// The workout a run executes: a standalone activity, or one activity out
/// of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorkoutDefinition {
    Activity(Activity),
    Session {
        session: Session,
        /// Index of the activity to run. The bootstrap resolver may leave
        /// this out of range (with a blocker attached); such a definition
        /// must not be stepped.
        start_index: usize,
    },
}

impl WorkoutDefinition {
    /// The activity this run executes. `None` when the start index does
    /// not resolve.
    pub fn current_activity(&self) -> Option<&Activity> {
        match self {
            WorkoutDefinition::Activity(activity) => Some(activity),
            WorkoutDefinition::Session {
                session,
                start_index,
            } => session.activities.get(*start_index),
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            WorkoutDefinition::Activity(_) => None,
            WorkoutDefinition::Session { session, .. } => Some(session.id.as_str()),
        }
    }

    /// Resolved current-activity index; 0 for standalone runs.
    pub fn activity_index(&self) -> usize {
        match self {
            WorkoutDefinition::Activity(_) => 0,
            WorkoutDefinition::Session { start_index, .. } => *start_index,
        }
    }
}

/// State of one run, produced by the bootstrap resolver and owned by the
/// phase controller until the run reaches `Done` or is abandoned.
///
/// The definition is deep-copied out of the raw parameters at resolution
/// time; nothing outside the controller can alias it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub definition: WorkoutDefinition,
    pub iteration: u32,
    pub phase: Phase,
    /// Remaining time in the current phase, in seconds.
    pub time_remaining: f64,
    pub running: bool,
}

impl ExecutionContext {
    pub fn new(definition: WorkoutDefinition) -> Self {
        Self {
            definition,
            iteration: 0,
            phase: Phase::Ready,
            time_remaining: 0.0,
            running: false,
        }
    }
}
