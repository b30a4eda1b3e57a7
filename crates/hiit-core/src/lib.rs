//! # Hiit Core Library
//!
//! Execution engine for interval workouts: given a workout definition (a
//! standalone activity or one activity out of a session), it drives a
//! real-time run through alternating effort/rest phases, dispatches sound
//! and haptic cues, and emits a terminal completion event.
//!
//! ## Architecture
//!
//! - **Bootstrap Resolver**: validates untrusted string parameters into an
//!   [`ExecutionContext`], reporting every anomaly without ever leaving
//!   the context undefined
//! - **Phase Controller**: the run state machine; the caller invokes
//!   [`PhaseController::tick`] on a fixed 10 ms period and drains
//!   transition events
//! - **Feedback Dispatcher**: stateless cue profiles handed to a host
//!   [`CueSink`]
//! - **Workout model**: serde types for activities and sessions plus the
//!   duration-token codec used for default schedule offsets
//!
//! Storage, sharing, and UI are external collaborators: the engine
//! performs no I/O beyond the injected sink and diagnostics channels.

pub mod bootstrap;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod events;
pub mod feedback;
pub mod settings;
pub mod workout;

pub use bootstrap::{resolve, Resolution};
pub use diagnostics::{BufferedDiagnostics, Diagnostics, NullDiagnostics, StderrDiagnostics};
pub use engine::{format_clock, ExecutionContext, Phase, PhaseController, Snapshot, WorkoutDefinition, TICK_MS};
pub use error::{ConfigError, ExecutionError};
pub use events::{CompletionSummary, Event};
pub use feedback::{Cue, CueKind, CueSink, NullSink, SoundCue};
pub use settings::{Config, FeedbackSettings};
pub use workout::{Activity, ActivityKind, Session};
