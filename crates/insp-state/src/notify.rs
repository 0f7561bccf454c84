//! # Host Seams
//!
//! The controller talks to its host through two traits:
//!
//! - [`NotificationSink`] receives one [`Notification`] per successful
//!   submission. Presenting it (toast, log line, stdout) is the host's job.
//! - [`Navigator`] is asked to leave the checklist feature entirely.
//!
//! Two sinks ship with the crate: [`TracingNotifier`] (the default) and
//! [`RecordingNotifier`], which keeps every notification in memory.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use insp_core::InspectionId;

use crate::scoring::OverallResult;

/// A human-readable event raised by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The inspection the event refers to.
    pub inspection_id: InspectionId,
    /// The scored outcome.
    pub outcome: OverallResult,
    /// Message to display.
    pub message: String,
}

impl Notification {
    /// The success message raised when an inspection is submitted.
    pub fn inspection_completed(inspection_id: InspectionId, outcome: OverallResult) -> Self {
        Self {
            inspection_id,
            outcome,
            message: format!("Inspection completed — {outcome}"),
        }
    }
}

/// Receives controller notifications.
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification.
    fn notify(&self, notification: &Notification);
}

/// Leaves the checklist feature ("go back").
pub trait Navigator: Send + Sync {
    /// Navigate away from the checklist feature.
    fn go_back(&self);
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        tracing::info!(
            inspection_id = %notification.inspection_id,
            outcome = %notification.outcome,
            "{}",
            notification.message
        );
    }
}

/// Keeps every notification in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// A new, empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notifications received so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.received.lock().clone()
    }

    /// Number of notifications received.
    pub fn len(&self) -> usize {
        self.received.lock().len()
    }

    /// Whether nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.received.lock().is_empty()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.received.lock().push(notification.clone());
    }
}
