//! Fire-and-forget anomaly reporting.
//!
//! Malformed input never crashes a run; it is narrated to a host-provided
//! [`Diagnostics`] collaborator and the caller decides whether to abort.
//! The CLI routes reports to stderr; tests capture them in a buffer.

use std::sync::Mutex;

/// Receiver for anomaly reports. Implementations must not fail.
pub trait Diagnostics {
    fn notify(&self, message: &str);
}

/// Writes every report to stderr.
#[derive(Debug, Default)]
pub struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn notify(&self, message: &str) {
        eprintln!("[debug] {message}");
    }
}

/// Swallows every report.
#[derive(Debug, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn notify(&self, _message: &str) {}
}

/// Collects reports in memory so callers can assert on them.
#[derive(Debug, Default)]
pub struct BufferedDiagnostics {
    messages: Mutex<Vec<String>>,
}

impl BufferedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }
}

impl Diagnostics for BufferedDiagnostics {
    fn notify(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_diagnostics_records_in_order() {
        let diag = BufferedDiagnostics::new();
        diag.notify("first");
        diag.notify("second");
        assert_eq!(diag.messages(), vec!["first", "second"]);
        assert!(diag.contains("sec"));
        assert!(!diag.contains("third"));
    }
}
