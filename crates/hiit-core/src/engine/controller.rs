//! Phase controller: the run state machine.
//!
//! Owns the execution context, the countdown, and the cue sink for the
//! lifetime of one run. All mutation goes through the operations below;
//! the host observes transitions by draining [`PhaseController::poll_events`].
//!
//! ```text
//! Ready -> Effort -> (Rest -> Effort)* -> Done
//! ```
//!
//! The caller drives progress by invoking [`tick`](PhaseController::tick)
//! on a fixed 10 ms period while a countdown is active. Skip and abandon
//! run the same completion handlers synchronously, so no tick can race
//! them.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::context::{ExecutionContext, Phase, WorkoutDefinition};
use super::countdown::Countdown;
use crate::events::{CompletionSummary, Event};
use crate::feedback::{self, CueSink};
use crate::settings::FeedbackSettings;
use crate::workout::Activity;

pub struct PhaseController {
    definition: WorkoutDefinition,
    iteration: u32,
    phase: Phase,
    running: bool,
    ready_secs: u32,
    countdown: Countdown,
    settings: FeedbackSettings,
    sink: Box<dyn CueSink>,
    events: Vec<Event>,
    /// Whether the current phase's entry cues have fired. Entering a phase
    /// while paused defers the cues to the first resume; a later resume of
    /// the same phase must not re-fire them.
    cued: bool,
}

/// Point-in-time view of a run, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub iteration: u32,
    pub iterations: u32,
    pub remaining_secs: f64,
    pub running: bool,
    pub activity_name: Option<String>,
}

impl PhaseController {
    /// Take ownership of a resolved context and enter the ready pre-roll.
    ///
    /// The context must carry a resolvable current activity; the bootstrap
    /// resolver flags contexts that do not, and the caller aborts on the
    /// blocker instead of constructing a controller. Operating on an
    /// unresolvable context anyway degrades every operation to a no-op.
    pub fn new(
        context: ExecutionContext,
        ready_secs: u32,
        settings: FeedbackSettings,
        sink: Box<dyn CueSink>,
    ) -> Self {
        let mut controller = Self {
            definition: context.definition,
            iteration: context.iteration,
            phase: context.phase,
            running: context.running,
            ready_secs,
            countdown: Countdown::new(),
            settings,
            sink,
            events: Vec::new(),
            cued: false,
        };
        controller.enter_ready();
        controller
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> f64 {
        self.countdown.remaining_secs()
    }

    pub fn current_activity(&self) -> Option<&Activity> {
        self.definition.current_activity()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            iteration: self.iteration,
            iterations: self
                .current_activity()
                .map(|a| a.iterations())
                .unwrap_or(0),
            remaining_secs: self.countdown.remaining_secs(),
            running: self.running,
            activity_name: self.current_activity().map(|a| a.name.clone()),
        }
    }

    /// Drain the transition events emitted since the last call.
    pub fn poll_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance one tick period. No-op unless a countdown is active.
    pub fn tick(&mut self) {
        if self.phase == Phase::Done {
            return;
        }
        if self.countdown.tick() {
            self.phase_elapsed();
        }
    }

    /// Toggle between running and paused. Pausing cancels the countdown
    /// but preserves the remaining time and the phase; resuming restarts
    /// the countdown from the preserved remaining time and fires any
    /// phase-entry cues that have not fired yet.
    pub fn start_or_pause(&mut self) {
        if self.phase == Phase::Done {
            return;
        }
        if self.running {
            self.running = false;
            self.countdown.cancel();
            self.push(Event::Paused {
                remaining_secs: self.countdown.remaining_secs(),
                at: Utc::now(),
            });
        } else {
            self.running = true;
            // User-paced efforts have no countdown to resume.
            if !(self.phase == Phase::Effort && self.is_user_paced()) {
                self.countdown.resume();
            }
            if !self.cued {
                self.dispatch_entry_cues();
            }
            self.push(Event::Resumed {
                remaining_secs: self.countdown.remaining_secs(),
                at: Utc::now(),
            });
        }
    }

    /// End a user-paced effort. No-op outside the effort phase of a
    /// step-kind activity.
    pub fn advance(&mut self) {
        if self.phase != Phase::Effort || !self.is_user_paced() {
            return;
        }
        self.effort_elapsed();
    }

    /// Force-complete the current phase: cancel the countdown and run the
    /// same handler its elapse would have run, synchronously.
    pub fn skip(&mut self) {
        if self.phase == Phase::Done {
            return;
        }
        self.countdown.cancel();
        self.push(Event::PhaseSkipped {
            phase: self.phase,
            at: Utc::now(),
        });
        self.phase_elapsed();
    }

    /// End the run now, regardless of remaining iterations.
    pub fn abandon(&mut self) {
        self.complete();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn phase_elapsed(&mut self) {
        match self.phase {
            Phase::Ready => self.ready_elapsed(),
            Phase::Effort => self.effort_elapsed(),
            Phase::Rest => self.rest_elapsed(),
            Phase::Done => {}
        }
    }

    fn enter_ready(&mut self) {
        self.phase = Phase::Ready;
        self.cued = false;
        self.countdown.arm(u64::from(self.ready_secs) * 1000);
        if self.running {
            self.countdown.resume();
        }
        self.push(Event::ReadyStarted {
            duration_secs: self.ready_secs,
            at: Utc::now(),
        });
    }

    fn ready_elapsed(&mut self) {
        self.countdown.cancel();
        self.iteration = 1;
        self.enter_effort();
    }

    fn enter_effort(&mut self) {
        let Some((_, _, effort_secs)) = self.activity_numbers() else {
            return;
        };
        self.phase = Phase::Effort;
        self.cued = false;
        match effort_secs {
            Some(secs) => {
                self.countdown.arm(u64::from(secs) * 1000);
                if self.running {
                    self.countdown.resume();
                    self.dispatch_entry_cues();
                }
            }
            None => {
                // The set is live the moment it starts; only advance()
                // ends it.
                self.countdown.arm(0);
                self.running = true;
                self.dispatch_entry_cues();
            }
        }
        self.push(Event::EffortStarted {
            iteration: self.iteration,
            duration_secs: effort_secs,
            at: Utc::now(),
        });
    }

    fn effort_elapsed(&mut self) {
        self.countdown.cancel();
        let Some((iterations, rest_secs, _)) = self.activity_numbers() else {
            return;
        };
        // The final effort completes the run; Rest never follows it.
        if self.iteration >= iterations {
            self.complete();
            return;
        }
        if rest_secs > 0 {
            self.enter_rest(rest_secs);
        } else {
            self.step();
        }
    }

    fn enter_rest(&mut self, rest_secs: u32) {
        self.phase = Phase::Rest;
        self.cued = false;
        self.countdown.arm(u64::from(rest_secs) * 1000);
        if self.running {
            self.countdown.resume();
            self.dispatch_entry_cues();
        }
        self.push(Event::RestStarted {
            iteration: self.iteration,
            duration_secs: rest_secs,
            at: Utc::now(),
        });
    }

    fn rest_elapsed(&mut self) {
        self.countdown.cancel();
        self.step();
    }

    /// Move to the next iteration's effort, or complete past the last one.
    /// Safe against duplicate invocation after `Done`.
    fn step(&mut self) {
        if self.phase == Phase::Done {
            return;
        }
        let Some((iterations, _, _)) = self.activity_numbers() else {
            return;
        };
        self.iteration += 1;
        if self.iteration > iterations {
            self.complete();
        } else {
            self.enter_effort();
        }
    }

    fn complete(&mut self) {
        if self.phase == Phase::Done {
            return;
        }
        self.running = false;
        self.countdown.cancel();
        for cue in feedback::completion_cues(&self.settings) {
            self.sink.play(&cue);
        }
        self.phase = Phase::Done;
        let summary = self.definition.current_activity().cloned().map(|activity| {
            CompletionSummary {
                session_id: self.definition.session_id().map(String::from),
                activity_index: self.definition.activity_index(),
                activity,
            }
        });
        if let Some(summary) = summary {
            self.push(Event::Completed {
                summary,
                at: Utc::now(),
            });
        }
    }

    fn dispatch_entry_cues(&mut self) {
        let cues = match self.phase {
            Phase::Ready | Phase::Effort => {
                feedback::effort_entry_cues(self.phase, &self.settings)
            }
            Phase::Rest => feedback::rest_entry_cues(&self.settings),
            Phase::Done => Vec::new(),
        };
        for cue in &cues {
            self.sink.play(cue);
        }
        self.cued = true;
    }

    fn is_user_paced(&self) -> bool {
        self.current_activity()
            .map(|a| a.is_user_paced())
            .unwrap_or(false)
    }

    fn activity_numbers(&self) -> Option<(u32, u32, Option<u32>)> {
        self.current_activity().map(|a| {
            (
                a.iterations(),
                a.rest_duration_secs(),
                a.effort_duration_secs(),
            )
        })
    }

    fn push(&mut self, event: Event) {
        self.events.push(event);
    }
}
