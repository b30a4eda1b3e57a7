//! Activity model.
//!
//! An activity is one workout element. Time-boxed activities count the
//! effort phase down; user-paced (step) activities end effort only on an
//! explicit advance.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::session::Session;

/// Default iteration count for newly created activities.
pub const DEFAULT_ITERATIONS: u32 = 10;
/// Default effort duration (seconds) for time-boxed activities.
pub const DEFAULT_EFFORT_SECS: u32 = 30;
/// Default rest duration in seconds.
pub const DEFAULT_REST_SECS: u32 = 30;

/// Id prefix used for activities that belong to no session.
const ORPHAN_ID_PREFIX: &str = "zzzz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

/// Activity kind plus its kind-specific configuration.
///
/// Wire form: `{"kind":"time","config":{...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "config", rename_all = "lowercase")]
pub enum ActivityKind {
    Time(TimeConfig),
    Step(StepConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeConfig {
    pub iterations: u32,
    /// Effort duration in seconds.
    pub effort_duration: u32,
    /// Rest duration in seconds.
    pub rest_duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepConfig {
    pub iterations: u32,
    /// Rest duration in seconds.
    pub rest_duration: u32,
}

impl Activity {
    /// Create a time-boxed activity with the product defaults.
    pub fn new_time(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            kind: ActivityKind::Time(TimeConfig {
                iterations: DEFAULT_ITERATIONS,
                effort_duration: DEFAULT_EFFORT_SECS,
                rest_duration: DEFAULT_REST_SECS,
            }),
        }
    }

    /// Create a user-paced activity with the product defaults.
    pub fn new_step(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: String::new(),
            kind: ActivityKind::Step(StepConfig {
                iterations: DEFAULT_ITERATIONS,
                rest_duration: DEFAULT_REST_SECS,
            }),
        }
    }

    /// Number of effort(+rest) cycles. Always at least 1, whatever the
    /// stored value claims.
    pub fn iterations(&self) -> u32 {
        let raw = match &self.kind {
            ActivityKind::Time(cfg) => cfg.iterations,
            ActivityKind::Step(cfg) => cfg.iterations,
        };
        raw.max(1)
    }

    pub fn rest_duration_secs(&self) -> u32 {
        match &self.kind {
            ActivityKind::Time(cfg) => cfg.rest_duration,
            ActivityKind::Step(cfg) => cfg.rest_duration,
        }
    }

    /// Effort duration for time-boxed activities; `None` when user-paced.
    pub fn effort_duration_secs(&self) -> Option<u32> {
        match &self.kind {
            ActivityKind::Time(cfg) => Some(cfg.effort_duration),
            ActivityKind::Step(_) => None,
        }
    }

    pub fn is_user_paced(&self) -> bool {
        matches!(self.kind, ActivityKind::Step(_))
    }

    /// Convert to a time-boxed activity, installing the default effort
    /// duration. No-op when already time-boxed.
    pub fn convert_to_time(&mut self) {
        if let ActivityKind::Step(cfg) = self.kind {
            self.kind = ActivityKind::Time(TimeConfig {
                iterations: cfg.iterations,
                effort_duration: DEFAULT_EFFORT_SECS,
                rest_duration: cfg.rest_duration,
            });
        }
    }

    /// Convert to a user-paced activity, dropping the effort duration.
    /// No-op when already user-paced.
    pub fn convert_to_step(&mut self) {
        if let ActivityKind::Time(cfg) = self.kind {
            self.kind = ActivityKind::Step(StepConfig {
                iterations: cfg.iterations,
                rest_duration: cfg.rest_duration,
            });
        }
    }

    /// Assign a fresh id, unique within `session` when one is given.
    ///
    /// Ids are `{session-id|zzzz}-{epoch36}{rand36}` and are re-rolled on
    /// collision with an existing activity id in the session.
    pub fn assign_generated_id(&mut self, session: Option<&Session>) {
        let epoch36 = to_base36(Utc::now().timestamp_millis().max(0) as u64);
        let prefix = session.map(|s| s.id.as_str()).unwrap_or(ORPHAN_ID_PREFIX);
        let mut rng = rand::thread_rng();

        let mut candidate = format!("{prefix}-{epoch36}{}", to_base36(rng.gen_range(0..1296)));
        if let Some(session) = session {
            while session.activities.iter().any(|a| a.id == candidate) {
                candidate = format!("{prefix}-{epoch36}{}", to_base36(rng.gen_range(0..1296)));
            }
        }
        self.id = candidate;
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_form() {
        let json = r#"{"id":"a1","kind":"time","config":{"iterations":1,"effortDuration":5,"restDuration":2}}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.id, "a1");
        assert_eq!(activity.name, "");
        assert_eq!(activity.iterations(), 1);
        assert_eq!(activity.effort_duration_secs(), Some(5));
        assert_eq!(activity.rest_duration_secs(), 2);
        assert!(!activity.is_user_paced());
    }

    #[test]
    fn parses_step_kind_without_effort_duration() {
        let json = r#"{"id":"a2","name":"Push-ups","kind":"step","config":{"iterations":3,"restDuration":20}}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert!(activity.is_user_paced());
        assert_eq!(activity.effort_duration_secs(), None);
        assert_eq!(activity.rest_duration_secs(), 20);
    }

    #[test]
    fn serialization_round_trips() {
        let activity = Activity::new_time("Sprints");
        let json = serde_json::to_string(&activity).unwrap();
        let back: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, activity);
        assert!(json.contains(r#""kind":"time""#));
        assert!(json.contains(r#""effortDuration":30"#));
    }

    #[test]
    fn iterations_accessor_enforces_minimum() {
        let json = r#"{"kind":"time","config":{"iterations":0,"effortDuration":5,"restDuration":0}}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.iterations(), 1);
    }

    #[test]
    fn kind_conversion_installs_and_drops_effort_duration() {
        let mut activity = Activity::new_step("Squats");
        activity.convert_to_time();
        assert_eq!(activity.effort_duration_secs(), Some(DEFAULT_EFFORT_SECS));

        activity.convert_to_step();
        assert_eq!(activity.effort_duration_secs(), None);
        assert_eq!(activity.iterations(), DEFAULT_ITERATIONS);
    }

    #[test]
    fn generated_id_uses_orphan_prefix_without_session() {
        let mut activity = Activity::new_time("Sprints");
        activity.assign_generated_id(None);
        assert!(activity.id.starts_with("zzzz-"));
    }

    #[test]
    fn base36_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1295), "zz");
    }
}
