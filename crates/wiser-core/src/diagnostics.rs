// ── Operator notifications ──
//
// When a refresh fails for a reason the operator has to fix (hub
// unreachable, hub answering garbage) the coordinator raises one
// `DiagnosticEvent` per failure. Where it ends up is the host's choice:
// the log, a persistent notification board, or any closure.

use std::fmt;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::warn;

/// Stable id of the setup notification; re-raising replaces the previous one.
pub const NOTIFICATION_ID: &str = "wiser_notification";
pub const NOTIFICATION_TITLE: &str = "Wiser Component Setup";

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEvent {
    pub notification_id: String,
    pub title: String,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl DiagnosticEvent {
    /// The notification raised when a hub refresh fails.
    pub fn fetch_failed(error: &dyn fmt::Display) -> Self {
        Self {
            notification_id: NOTIFICATION_ID.into(),
            title: NOTIFICATION_TITLE.into(),
            message: format!(
                "Error: {error}. You will need to restart wiser after fixing \
                 the cause (wrong hub address or secret, hub offline)."
            ),
            raised_at: Utc::now(),
        }
    }
}

/// Receiver for diagnostic events.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, event: &DiagnosticEvent);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&DiagnosticEvent) + Send + Sync,
{
    fn report(&self, event: &DiagnosticEvent) {
        self(event);
    }
}

// ── TracingDiagnostics ───────────────────────────────────────────────

/// Sink that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, event: &DiagnosticEvent) {
        warn!(
            notification_id = %event.notification_id,
            title = %event.title,
            "{}",
            event.message
        );
    }
}

// ── NotificationBoard ────────────────────────────────────────────────

/// Persistent notifications keyed by id.
///
/// Raising an event with an id that is already on the board replaces it,
/// so a hub that keeps failing produces one live notification, not a pile.
#[derive(Debug, Default)]
pub struct NotificationBoard {
    active: DashMap<String, DiagnosticEvent>,
}

impl NotificationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a notification, returning it if it was active.
    pub fn dismiss(&self, notification_id: &str) -> Option<DiagnosticEvent> {
        self.active.remove(notification_id).map(|(_, event)| event)
    }

    pub fn get(&self, notification_id: &str) -> Option<DiagnosticEvent> {
        self.active.get(notification_id).map(|e| e.value().clone())
    }

    /// Active notifications, oldest first.
    pub fn active(&self) -> Vec<DiagnosticEvent> {
        let mut events: Vec<_> = self.active.iter().map(|e| e.value().clone()).collect();
        events.sort_by_key(|e| e.raised_at);
        events
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl DiagnosticSink for NotificationBoard {
    fn report(&self, event: &DiagnosticEvent) {
        self.active
            .insert(event.notification_id.clone(), event.clone());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::{DiagnosticEvent, DiagnosticSink, NOTIFICATION_ID, NotificationBoard};

    #[test]
    fn board_keeps_one_notification_per_id() {
        let board = NotificationBoard::new();
        board.report(&DiagnosticEvent::fetch_failed(&"timed out"));
        board.report(&DiagnosticEvent::fetch_failed(&"connection refused"));

        let active = board.active();
        assert_eq!(active.len(), 1);
        assert!(active[0].message.contains("connection refused"));
        assert_eq!(active[0].title, "Wiser Component Setup");
        assert_eq!(board.get(NOTIFICATION_ID).as_ref(), Some(&active[0]));

        assert!(board.dismiss(NOTIFICATION_ID).is_some());
        assert!(board.is_empty());
        assert!(board.dismiss(NOTIFICATION_ID).is_none());
    }

    #[test]
    fn closures_are_sinks() {
        let seen = Mutex::new(Vec::new());
        let sink = |event: &DiagnosticEvent| seen.lock().unwrap().push(event.message.clone());

        sink.report(&DiagnosticEvent::fetch_failed(&"boom"));

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("Error: boom."));
        assert!(seen[0].contains("restart"));
    }
}
