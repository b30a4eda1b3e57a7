//! Session model: an ordered list of activities shared as one workout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::activity::Activity;
use super::duration::parse_duration_offset;
use crate::diagnostics::Diagnostics;

/// Offset applied when scheduling a session with no stored preference.
pub const DEFAULT_SCHEDULE_TIME: &str = "PT2H";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Duration token offsetting the suggested schedule slot from "now".
    #[serde(default)]
    pub default_schedule_time: Option<String>,
    pub activities: Vec<Activity>,
}

fn default_version() -> u32 {
    1
}

impl Session {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            version: default_version(),
            id: id.into(),
            name: name.into(),
            description: String::new(),
            default_schedule_time: Some(DEFAULT_SCHEDULE_TIME.to_string()),
            activities: Vec::new(),
        }
    }

    /// Append `activity`, assigning it a session-unique id first.
    pub fn add_activity(&mut self, mut activity: Activity) {
        activity.assign_generated_id(Some(self));
        self.activities.push(activity);
    }

    /// Remove the activity with `activity_id`. Unknown ids are reported and
    /// leave the session untouched.
    pub fn remove_activity(&mut self, activity_id: &str, diag: &dyn Diagnostics) -> bool {
        if !self.activities.iter().any(|a| a.id == activity_id) {
            diag.notify(&format!(
                "activity '{activity_id}' not found in session '{}'",
                self.id
            ));
            return false;
        }
        self.activities.retain(|a| a.id != activity_id);
        true
    }

    /// The suggested schedule slot: `base` plus the stored offset token.
    ///
    /// A missing or unparseable token is reported and yields `base`
    /// unchanged.
    pub fn default_schedule_at(&self, base: DateTime<Utc>, diag: &dyn Diagnostics) -> DateTime<Utc> {
        let Some(token) = self.default_schedule_time.as_deref() else {
            return base;
        };
        match parse_duration_offset(token) {
            Some(offset) => base + offset,
            None => {
                diag.notify(&format!("unknown duration format: {token}"));
                base
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::BufferedDiagnostics;
    use chrono::Duration;

    fn session_with(activities: Vec<Activity>) -> Session {
        Session {
            activities,
            ..Session::new("s1", "Morning")
        }
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let json = r#"{"id":"s1","activities":[
            {"id":"a1","kind":"time","config":{"iterations":2,"effortDuration":10,"restDuration":5}}
        ]}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.version, 1);
        assert_eq!(session.name, "");
        assert_eq!(session.default_schedule_time, None);
        assert_eq!(session.activities.len(), 1);
    }

    #[test]
    fn add_activity_assigns_session_scoped_id() {
        let mut session = session_with(Vec::new());
        session.add_activity(Activity::new_time("Sprints"));
        assert!(session.activities[0].id.starts_with("s1-"));
    }

    #[test]
    fn remove_activity_reports_unknown_ids() {
        let diag = BufferedDiagnostics::new();
        let mut session = session_with(Vec::new());
        session.add_activity(Activity::new_step("Squats"));
        let id = session.activities[0].id.clone();

        assert!(!session.remove_activity("missing", &diag));
        assert!(diag.contains("'missing' not found"));
        assert_eq!(session.activities.len(), 1);

        assert!(session.remove_activity(&id, &diag));
        assert!(session.activities.is_empty());
    }

    #[test]
    fn default_schedule_applies_stored_offset() {
        let diag = BufferedDiagnostics::new();
        let session = Session::new("s1", "Morning");
        let base = Utc::now();
        assert_eq!(
            session.default_schedule_at(base, &diag),
            base + Duration::try_hours(2).unwrap()
        );
        assert!(diag.messages().is_empty());
    }

    #[test]
    fn default_schedule_falls_back_on_bad_token() {
        let diag = BufferedDiagnostics::new();
        let mut session = Session::new("s1", "Morning");
        session.default_schedule_time = Some("soonish".to_string());
        let base = Utc::now();
        assert_eq!(session.default_schedule_at(base, &diag), base);
        assert!(diag.contains("unknown duration format"));
    }
}
