pub mod activity;
pub mod config;
pub mod resolve;
pub mod run;

use std::collections::HashMap;

use hiit_core::bootstrap::{PARAM_ACTIVITY, PARAM_CURRENT_ACTIVITY_ID, PARAM_SESSION};

/// Assemble the bootstrap parameter map from CLI arguments.
pub(crate) fn build_params(
    activity: Option<String>,
    session: Option<String>,
    index: Option<usize>,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if let Some(activity) = activity {
        params.insert(PARAM_ACTIVITY.to_string(), activity);
    }
    if let Some(session) = session {
        params.insert(PARAM_SESSION.to_string(), session);
    }
    if let Some(index) = index {
        params.insert(PARAM_CURRENT_ACTIVITY_ID.to_string(), index.to_string());
    }
    params
}
