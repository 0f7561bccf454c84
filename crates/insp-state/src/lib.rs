//! # insp-state: Inspection Session Controller
//!
//! Runs a single equipment inspection from template selection to a scored,
//! immutable record.
//!
//! ## Modules
//!
//! - **Tree** (`tree.rs`): the section/item tree with `Arc`-shared nodes and
//!   pure `with_*` updates.
//!
//! - **Scoring** (`scoring.rs`): result tallies, the PASS / FAIL / ADVISORY
//!   rule and the rounded progress percentage.
//!
//! - **Session** (`session.rs`): the one inspection in progress and its
//!   submission preconditions.
//!
//! - **Record** (`record.rs`): frozen `CompletedInspection` values and their
//!   content digest.
//!
//! - **Controller** (`controller.rs`): the public entry point tying the
//!   above together with history and host notifications.
//!
//! - **Notify** (`notify.rs`): the `NotificationSink` and `Navigator` seams.
//!
//! ## Outcome rule
//!
//! ```text
//! fail > 0                 → FAIL
//! pass < total - na        → ADVISORY
//! otherwise                → PASS
//! ```
//!
//! Unanswered items count against the `pass` comparison, so a partially
//! answered checklist with no failures is ADVISORY.

pub mod controller;
pub mod error;
pub mod notify;
pub mod record;
pub mod scoring;
pub mod session;
pub mod tree;

pub use controller::ChecklistController;
pub use error::{SessionError, SubmitError};
pub use notify::{Navigator, Notification, NotificationSink, RecordingNotifier, TracingNotifier};
pub use record::{CompletedInspection, HistorySummary};
pub use scoring::{OverallResult, ResultCounts};
pub use session::{ActiveSession, SessionState};
pub use tree::{ChecklistItem, ChecklistSection, ChecklistTree, ItemResult};
