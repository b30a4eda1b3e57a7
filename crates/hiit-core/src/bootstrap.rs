//! Bootstrap resolver: untrusted parameters in, execution context out.
//!
//! The raw parameters come from outside the process (deep links, shared
//! payloads) and cannot be trusted. Resolution never panics and never
//! leaves the context undefined: hard failures (no workout, unparseable
//! JSON) return an error, while a session with a broken activity index
//! still yields a context, flagged with a blocker the caller must abort
//! on. Every anomaly is additionally narrated to the [`Diagnostics`]
//! collaborator.

use std::collections::HashMap;

use crate::diagnostics::Diagnostics;
use crate::engine::{ExecutionContext, WorkoutDefinition};
use crate::error::{ExecutionError, Result};
use crate::workout::{Activity, Session};

/// Parameter naming the JSON-encoded activity.
pub const PARAM_ACTIVITY: &str = "activity";
/// Parameter naming the JSON-encoded session.
pub const PARAM_SESSION: &str = "session";
/// Parameter carrying the string-encoded activity index within a session.
pub const PARAM_CURRENT_ACTIVITY_ID: &str = "currentActivityId";

/// Outcome of a successful resolution.
#[derive(Debug)]
pub struct Resolution {
    pub context: ExecutionContext,
    /// An anomaly that makes the context unusable for stepping. The
    /// caller must not construct a controller while one is present.
    pub blocker: Option<ExecutionError>,
}

impl Resolution {
    pub fn is_startable(&self) -> bool {
        self.blocker.is_none()
    }
}

/// Resolve raw string parameters into an execution context.
///
/// Priority order: a standalone `activity` wins over a `session`; a
/// session requires `currentActivityId`. The definition is deep-copied
/// out of the raw JSON, so later mutation of the parameter source cannot
/// alias the run. On success the context starts in `Ready` with iteration
/// 0, no time remaining, and not running.
pub fn resolve(params: &HashMap<String, String>, diag: &dyn Diagnostics) -> Result<Resolution> {
    if let Some(raw) = params.get(PARAM_ACTIVITY) {
        let activity: Activity = match serde_json::from_str(raw) {
            Ok(activity) => activity,
            Err(source) => {
                diag.notify("invalid 'activity' parameter: not valid JSON");
                return Err(ExecutionError::InvalidActivityJson { source });
            }
        };
        return Ok(Resolution {
            context: ExecutionContext::new(WorkoutDefinition::Activity(activity)),
            blocker: None,
        });
    }

    if let Some(raw) = params.get(PARAM_SESSION) {
        let session: Session = match serde_json::from_str(raw) {
            Ok(session) => session,
            Err(source) => {
                diag.notify("invalid 'session' parameter: not valid JSON");
                return Err(ExecutionError::InvalidSessionJson { source });
            }
        };
        let len = session.activities.len();
        let (start_index, blocker) = resolve_index(
            params.get(PARAM_CURRENT_ACTIVITY_ID).map(String::as_str),
            len,
            diag,
        );
        return Ok(Resolution {
            context: ExecutionContext::new(WorkoutDefinition::Session {
                session,
                start_index,
            }),
            blocker,
        });
    }

    diag.notify("no workout provided: expected an 'activity' or 'session' parameter");
    Err(ExecutionError::NoWorkoutProvided)
}

/// Resolve the activity index for a session of `len` activities.
///
/// Anomalies are reported and returned as a blocker; the index is left
/// invalid rather than clamped (`len` when no usable number was given, so
/// lookups fail by construction).
fn resolve_index(
    raw: Option<&str>,
    len: usize,
    diag: &dyn Diagnostics,
) -> (usize, Option<ExecutionError>) {
    let Some(raw) = raw else {
        diag.notify("missing 'currentActivityId' parameter");
        return (len, Some(ExecutionError::MissingActivityIndex));
    };
    match raw.parse::<usize>() {
        Ok(index) if index < len => (index, None),
        Ok(index) => {
            diag.notify("invalid 'currentActivityId' parameter: out of bounds");
            (
                index,
                Some(ExecutionError::ActivityIndexOutOfBounds {
                    raw: raw.to_string(),
                    len,
                }),
            )
        }
        Err(_) => {
            diag.notify("invalid 'currentActivityId' parameter: out of bounds");
            (
                len,
                Some(ExecutionError::ActivityIndexOutOfBounds {
                    raw: raw.to_string(),
                    len,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::BufferedDiagnostics;
    use crate::engine::Phase;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const SESSION_JSON: &str = r#"{"id":"s1","activities":[
        {"id":"a1","kind":"time","config":{"iterations":1,"effortDuration":5,"restDuration":2}},
        {"id":"a2","kind":"step","config":{"iterations":3,"restDuration":10}}
    ]}"#;

    #[test]
    fn activity_param_wins_over_session() {
        let diag = BufferedDiagnostics::new();
        let params = params(&[
            ("activity", r#"{"id":"solo","kind":"step","config":{"iterations":2,"restDuration":5}}"#),
            ("session", SESSION_JSON),
        ]);
        let resolution = resolve(&params, &diag).unwrap();
        assert!(resolution.is_startable());
        assert!(matches!(
            resolution.context.definition,
            WorkoutDefinition::Activity(_)
        ));
    }

    #[test]
    fn resolved_context_starts_ready() {
        let diag = BufferedDiagnostics::new();
        let params = params(&[(
            "activity",
            r#"{"id":"a1","kind":"time","config":{"iterations":1,"effortDuration":5,"restDuration":2}}"#,
        )]);
        let resolution = resolve(&params, &diag).unwrap();
        let ctx = &resolution.context;
        assert_eq!(ctx.phase, Phase::Ready);
        assert_eq!(ctx.iteration, 0);
        assert_eq!(ctx.time_remaining, 0.0);
        assert!(!ctx.running);
        assert_eq!(
            ctx.definition.current_activity().map(|a| a.id.as_str()),
            Some("a1")
        );
        assert!(diag.messages().is_empty());
    }

    #[test]
    fn malformed_activity_is_a_hard_failure() {
        let diag = BufferedDiagnostics::new();
        let params = params(&[("activity", "{not json")]);
        let err = resolve(&params, &diag).unwrap_err();
        assert!(matches!(err, ExecutionError::InvalidActivityJson { .. }));
        assert!(diag.contains("invalid 'activity' parameter"));
    }

    #[test]
    fn malformed_session_is_a_hard_failure() {
        let diag = BufferedDiagnostics::new();
        let params = params(&[("session", "[]")]);
        assert!(matches!(
            resolve(&params, &diag).unwrap_err(),
            ExecutionError::InvalidSessionJson { .. }
        ));
        assert!(diag.contains("invalid 'session' parameter"));
    }

    #[test]
    fn session_with_index_resolves_that_activity() {
        let diag = BufferedDiagnostics::new();
        let params = params(&[("session", SESSION_JSON), ("currentActivityId", "1")]);
        let resolution = resolve(&params, &diag).unwrap();
        assert!(resolution.is_startable());
        assert_eq!(
            resolution
                .context
                .definition
                .current_activity()
                .map(|a| a.id.as_str()),
            Some("a2")
        );
    }

    #[test]
    fn missing_index_returns_blocked_context() {
        let diag = BufferedDiagnostics::new();
        let params = params(&[("session", SESSION_JSON)]);
        let resolution = resolve(&params, &diag).unwrap();
        assert!(!resolution.is_startable());
        assert!(matches!(
            resolution.blocker,
            Some(ExecutionError::MissingActivityIndex)
        ));
        assert!(resolution.context.definition.current_activity().is_none());
        assert!(diag.contains("missing 'currentActivityId'"));
    }

    #[test]
    fn out_of_bounds_index_is_kept_not_clamped() {
        let diag = BufferedDiagnostics::new();
        let params = params(&[("session", SESSION_JSON), ("currentActivityId", "5")]);
        let resolution = resolve(&params, &diag).unwrap();
        assert!(matches!(
            resolution.blocker,
            Some(ExecutionError::ActivityIndexOutOfBounds { ref raw, len: 2 }) if raw == "5"
        ));
        assert_eq!(resolution.context.definition.activity_index(), 5);
        assert!(resolution.context.definition.current_activity().is_none());
    }

    #[test]
    fn non_numeric_index_is_out_of_bounds() {
        let diag = BufferedDiagnostics::new();
        let params = params(&[("session", SESSION_JSON), ("currentActivityId", "two")]);
        let resolution = resolve(&params, &diag).unwrap();
        assert!(matches!(
            resolution.blocker,
            Some(ExecutionError::ActivityIndexOutOfBounds { .. })
        ));
        assert!(resolution.context.definition.current_activity().is_none());
        assert!(diag.contains("out of bounds"));
    }

    #[test]
    fn no_parameters_is_no_workout() {
        let diag = BufferedDiagnostics::new();
        assert!(matches!(
            resolve(&HashMap::new(), &diag).unwrap_err(),
            ExecutionError::NoWorkoutProvided
        ));
        assert!(diag.contains("no workout provided"));
    }
}
