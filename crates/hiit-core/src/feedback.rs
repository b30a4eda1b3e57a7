//! Sound and haptic cue profiles.
//!
//! Profiles are stateless functions of the phase being entered and the
//! settings snapshot. The controller hands the resulting cues to a host
//! [`CueSink`] and forgets about them: delayed pulses are one-shot timers
//! owned by the sink, and pause/skip/abandon do not retract pulses that
//! are already scheduled.

use serde::{Deserialize, Serialize};

use crate::engine::Phase;
use crate::settings::FeedbackSettings;

/// Haptic pulse length for effort entry, in milliseconds.
const EFFORT_PULSE_MS: u64 = 500;
/// Haptic pulse length for rest entry and completion, in milliseconds.
const SHORT_PULSE_MS: u64 = 250;
/// Gap between consecutive short pulses, in milliseconds.
const PULSE_GAP_MS: u64 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Effort,
    Rest,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CueKind {
    Sound { sound: SoundCue },
    Haptic { duration_ms: u64 },
}

/// One cue, scheduled `delay_ms` after the phase transition that produced
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub delay_ms: u64,
    #[serde(flatten)]
    pub kind: CueKind,
}

impl Cue {
    fn sound(sound: SoundCue) -> Self {
        Self {
            delay_ms: 0,
            kind: CueKind::Sound { sound },
        }
    }

    fn haptic(delay_ms: u64, duration_ms: u64) -> Self {
        Self {
            delay_ms,
            kind: CueKind::Haptic { duration_ms },
        }
    }
}

/// Host output for cues. Implementations play sounds / drive the vibration
/// motor and own the scheduling of delayed pulses; the engine never waits
/// on them and never cancels them.
pub trait CueSink {
    fn play(&mut self, cue: &Cue);
}

/// Discards every cue.
#[derive(Debug, Default)]
pub struct NullSink;

impl CueSink for NullSink {
    fn play(&mut self, _cue: &Cue) {}
}

/// Cues for entering an effort phase: optional sound plus one long pulse.
///
/// Empty while the phase is `Ready` so the pre-roll countdown stays
/// silent.
pub fn effort_entry_cues(phase: Phase, settings: &FeedbackSettings) -> Vec<Cue> {
    if phase == Phase::Ready {
        return Vec::new();
    }
    let mut cues = Vec::new();
    if settings.sound_effort {
        cues.push(Cue::sound(SoundCue::Effort));
    }
    if settings.haptic_effort {
        cues.push(Cue::haptic(0, EFFORT_PULSE_MS));
    }
    cues
}

/// Cues for entering a rest phase: optional sound plus a double pulse.
pub fn rest_entry_cues(settings: &FeedbackSettings) -> Vec<Cue> {
    let mut cues = Vec::new();
    if settings.sound_rest {
        cues.push(Cue::sound(SoundCue::Rest));
    }
    if settings.haptic_rest {
        cues.push(Cue::haptic(0, SHORT_PULSE_MS));
        cues.push(Cue::haptic(PULSE_GAP_MS, SHORT_PULSE_MS));
    }
    cues
}

/// Cues for run completion: optional sound plus a triple pulse.
pub fn completion_cues(settings: &FeedbackSettings) -> Vec<Cue> {
    let mut cues = Vec::new();
    if settings.sound_rest {
        cues.push(Cue::sound(SoundCue::Completed));
    }
    if settings.haptic_rest {
        cues.push(Cue::haptic(0, SHORT_PULSE_MS));
        cues.push(Cue::haptic(PULSE_GAP_MS, SHORT_PULSE_MS));
        cues.push(Cue::haptic(2 * PULSE_GAP_MS, SHORT_PULSE_MS));
    }
    cues
}
