//! # Checklist Session Controller
//!
//! Drives one inspection from template selection to a scored, frozen
//! record, and keeps the session-local history of completed inspections.
//!
//! ## Lifecycle
//!
//! ```text
//! NoSession ──start_inspection──▶ InProgress
//! InProgress ──submit_inspection (ok)──▶ NoSession   (record prepended to history)
//! InProgress ──cancel_inspection──▶ NoSession        (nothing recorded)
//! any ──exit──▶ NoSession, Navigator::go_back()
//! ```
//!
//! Starting a new inspection while one is in progress replaces it.
//!
//! ## Rejections
//!
//! Edits without a session or with out-of-range indices return
//! [`SessionError`]; refused submissions return [`SubmitError`]. In both
//! cases the controller state is unchanged.
//!
//! History lives only in this value and is lost with it.

use chrono::Utc;

use insp_catalog::ChecklistTemplate;
use insp_core::{InspectionDate, InspectionId, Timestamp};

use crate::error::{SessionError, SubmitError};
use crate::notify::{Navigator, Notification, NotificationSink, TracingNotifier};
use crate::record::{CompletedInspection, HistorySummary};
use crate::scoring::ResultCounts;
use crate::session::{ActiveSession, SessionState};
use crate::tree::{ChecklistItem, ChecklistTree, ItemResult};

/// Owner of the active inspection and the completed-inspection history.
pub struct ChecklistController {
    session: Option<ActiveSession>,
    history: Vec<CompletedInspection>,
    notifier: Box<dyn NotificationSink>,
    navigator: Option<Box<dyn Navigator>>,
    last_issued: Option<InspectionId>,
}

impl std::fmt::Debug for ChecklistController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChecklistController")
            .field("session", &self.session)
            .field("history_len", &self.history.len())
            .field("has_navigator", &self.navigator.is_some())
            .finish()
    }
}

impl Default for ChecklistController {
    fn default() -> Self {
        Self::new()
    }
}

impl ChecklistController {
    /// A controller with no session, empty history and the tracing notifier.
    pub fn new() -> Self {
        Self {
            session: None,
            history: Vec::new(),
            notifier: Box::new(TracingNotifier),
            navigator: None,
            last_issued: None,
        }
    }

    /// Replace the notification sink.
    pub fn with_notifier(mut self, notifier: impl NotificationSink + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Attach a navigator for [`ChecklistController::exit`].
    pub fn with_navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Box::new(navigator));
        self
    }

    // ─── Session lifecycle ───────────────────────────────────────────

    /// Start an inspection on `template`, replacing any session in progress.
    pub fn start_inspection(&mut self, template: &ChecklistTemplate) {
        if let Some(previous) = self.session.take() {
            tracing::info!(
                session = %previous.id(),
                answered = previous.counts().answered,
                "discarding in-progress inspection"
            );
        }
        let session = ActiveSession::start(template);
        tracing::info!(
            session = %session.id(),
            template = %template.id,
            items = template.item_count(),
            "inspection started"
        );
        self.session = Some(session);
    }

    /// Discard the session in progress without recording anything.
    ///
    /// Returns whether there was a session to discard.
    pub fn cancel_inspection(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                tracing::info!(session = %session.id(), "inspection cancelled");
                true
            }
            None => false,
        }
    }

    /// Leave the checklist feature: cancel any session and ask the
    /// navigator to go back.
    pub fn exit(&mut self) {
        self.cancel_inspection();
        if let Some(navigator) = &self.navigator {
            navigator.go_back();
        }
    }

    /// Score and record the session in progress.
    ///
    /// On success the record is prepended to history, the session is cleared
    /// and one notification is raised.
    pub fn submit_inspection(&mut self) -> Result<&CompletedInspection, SubmitError> {
        let check = match &self.session {
            Some(session) => session.submission_check(),
            None => Err(SubmitError::NoActiveSession),
        };
        if let Err(e) = check {
            tracing::warn!(reason = %e, "submission refused");
            return Err(e);
        }
        let Some(session) = self.session.take() else {
            return Err(SubmitError::NoActiveSession);
        };

        let session_id = session.id();
        let id = self.next_inspection_id();
        let record = session.into_record(id, Timestamp::now());
        let notification = Notification::inspection_completed(record.id, record.overall_result);
        tracing::info!(
            session = %session_id,
            inspection_id = %record.id,
            outcome = %record.overall_result,
            pass = record.pass_count,
            fail = record.fail_count,
            na = record.na_count,
            total = record.total_items,
            "inspection submitted"
        );

        self.history.insert(0, record);
        self.notifier.notify(&notification);
        Ok(&self.history[0])
    }

    // ─── Item and section edits ──────────────────────────────────────

    /// Set the result of item `(s, i)`.
    ///
    /// Passing the result the item already holds clears it; `None` clears it.
    pub fn set_item_result(
        &mut self,
        s: usize,
        i: usize,
        result: Option<ItemResult>,
    ) -> Result<(), SessionError> {
        self.update_tree(s, Some(i), |tree| tree.with_item_result(s, i, result))?;
        tracing::debug!(
            section = s,
            item = i,
            result = result.map(|r| r.as_str()).unwrap_or("unset"),
            "item result set"
        );
        Ok(())
    }

    /// Replace the notes of item `(s, i)`.
    pub fn set_item_notes(&mut self, s: usize, i: usize, notes: &str) -> Result<(), SessionError> {
        self.update_tree(s, Some(i), |tree| tree.with_item_notes(s, i, notes))?;
        tracing::debug!(section = s, item = i, "item notes set");
        Ok(())
    }

    /// Flip the expanded flag of section `s`. Other sections are untouched.
    pub fn toggle_section(&mut self, s: usize) -> Result<(), SessionError> {
        self.update_tree(s, None, |tree| tree.with_section_toggled(s))?;
        tracing::debug!(section = s, "section toggled");
        Ok(())
    }

    fn update_tree(
        &mut self,
        s: usize,
        i: Option<usize>,
        update: impl FnOnce(&ChecklistTree) -> Option<ChecklistTree>,
    ) -> Result<(), SessionError> {
        let session = self.session_mut()?;
        match update(session.tree()) {
            Some(tree) => {
                session.replace_tree(tree);
                Ok(())
            }
            None => {
                let err = match session.check_item_index(s, i.unwrap_or(0)) {
                    Err(e) => e,
                    Ok(()) => SessionError::SectionOutOfRange {
                        section: s,
                        count: session.tree().sections().len(),
                    },
                };
                tracing::warn!(error = %err, "checklist edit rejected");
                Err(err)
            }
        }
    }

    // ─── Form fields ─────────────────────────────────────────────────

    /// Set the inspector name.
    pub fn set_inspector_name(&mut self, name: &str) -> Result<(), SessionError> {
        self.session_mut()?.set_inspector_name(name);
        Ok(())
    }

    /// Set the inspection location.
    pub fn set_location(&mut self, location: &str) -> Result<(), SessionError> {
        self.session_mut()?.set_location(location);
        Ok(())
    }

    /// Set the free-text notes for the whole inspection.
    pub fn set_additional_notes(&mut self, notes: &str) -> Result<(), SessionError> {
        self.session_mut()?.set_additional_notes(notes);
        Ok(())
    }

    /// Set the inspection date.
    pub fn set_inspection_date(&mut self, date: InspectionDate) -> Result<(), SessionError> {
        self.session_mut()?.set_date(date);
        Ok(())
    }

    fn session_mut(&mut self) -> Result<&mut ActiveSession, SessionError> {
        self.session.as_mut().ok_or_else(|| {
            tracing::warn!("edit attempted with no inspection in progress");
            SessionError::NoActiveSession
        })
    }

    // ─── Queries ─────────────────────────────────────────────────────

    /// Whether an inspection is in progress.
    pub fn state(&self) -> SessionState {
        if self.session.is_some() {
            SessionState::InProgress
        } else {
            SessionState::NoSession
        }
    }

    /// The inspection in progress, if any.
    pub fn session(&self) -> Option<&ActiveSession> {
        self.session.as_ref()
    }

    /// Every item of the session in progress, in section then item order.
    /// Empty when there is no session.
    pub fn flat_items(&self) -> Vec<&ChecklistItem> {
        self.session
            .as_ref()
            .map(|s| s.tree().items().collect())
            .unwrap_or_default()
    }

    /// Tally of the session in progress; all zero when there is none.
    pub fn counts(&self) -> ResultCounts {
        self.session
            .as_ref()
            .map(ActiveSession::counts)
            .unwrap_or_default()
    }

    /// Number of answered items in the session in progress.
    pub fn answered_count(&self) -> usize {
        self.counts().answered
    }

    /// Completion percentage of the session in progress.
    pub fn progress(&self) -> u32 {
        self.counts().progress()
    }

    /// Whether [`ChecklistController::submit_inspection`] would succeed.
    pub fn can_submit(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.submission_check().is_ok())
    }

    /// Completed inspections, most recent first.
    pub fn history(&self) -> &[CompletedInspection] {
        &self.history
    }

    /// Look up a completed inspection by id.
    pub fn find_inspection(&self, id: InspectionId) -> Option<&CompletedInspection> {
        self.history.iter().find(|r| r.id == id)
    }

    /// Outcome tallies over the history.
    pub fn history_summary(&self) -> HistorySummary {
        HistorySummary::from_records(&self.history)
    }

    /// Epoch-millisecond id, strictly greater than any id this controller
    /// has issued before.
    fn next_inspection_id(&mut self) -> InspectionId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let millis = match self.last_issued {
            Some(last) if now <= last.as_millis() => last.as_millis() + 1,
            _ => now,
        };
        let id = InspectionId::from_millis(millis);
        self.last_issued = Some(id);
        id
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::scoring::OverallResult;
    use insp_catalog::TemplateCatalog;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn ladder() -> Arc<ChecklistTemplate> {
        TemplateCatalog::builtin()
            .get("ladder-inspection")
            .unwrap()
            .clone()
    }

    fn started() -> (ChecklistController, RecordingNotifier) {
        let recorder = RecordingNotifier::new();
        let mut ctl = ChecklistController::new().with_notifier(recorder.clone());
        ctl.start_inspection(&ladder());
        (ctl, recorder)
    }

    fn answer_all(ctl: &mut ChecklistController, result: ItemResult) {
        let shape: Vec<usize> = ctl
            .session()
            .unwrap()
            .tree()
            .sections()
            .iter()
            .map(|s| s.items.len())
            .collect();
        for (s, len) in shape.into_iter().enumerate() {
            for i in 0..len {
                ctl.set_item_result(s, i, Some(result)).unwrap();
            }
        }
    }

    #[derive(Default, Clone)]
    struct CountingNavigator(Arc<AtomicUsize>);

    impl Navigator for CountingNavigator {
        fn go_back(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    #[test]
    fn test_new_controller_has_no_session() {
        let ctl = ChecklistController::new();
        assert_eq!(ctl.state(), SessionState::NoSession);
        assert!(ctl.flat_items().is_empty());
        assert_eq!(ctl.progress(), 0);
        assert!(!ctl.can_submit());
        assert!(ctl.history().is_empty());
    }

    #[test]
    fn test_start_builds_tree() {
        let (ctl, _) = started();
        assert_eq!(ctl.state(), SessionState::InProgress);
        assert_eq!(ctl.flat_items().len(), 16);
        assert_eq!(ctl.counts().total, 16);
        assert_eq!(ctl.answered_count(), 0);
    }

    #[test]
    fn test_start_replaces_session() {
        let (mut ctl, _) = started();
        ctl.set_item_result(0, 0, Some(ItemResult::Pass)).unwrap();
        let catalog = TemplateCatalog::builtin();
        ctl.start_inspection(catalog.get("safe-isolation").unwrap());
        let session = ctl.session().unwrap();
        assert_eq!(session.template_id().as_str(), "safe-isolation");
        assert_eq!(ctl.answered_count(), 0);
    }

    #[test]
    fn test_cancel_discards_without_record() {
        let (mut ctl, recorder) = started();
        ctl.set_item_result(0, 0, Some(ItemResult::Pass)).unwrap();
        assert!(ctl.cancel_inspection());
        assert_eq!(ctl.state(), SessionState::NoSession);
        assert!(ctl.history().is_empty());
        assert!(recorder.is_empty());
        assert!(!ctl.cancel_inspection());
    }

    #[test]
    fn test_exit_cancels_and_navigates() {
        let nav = CountingNavigator::default();
        let mut ctl = ChecklistController::new().with_navigator(nav.clone());
        ctl.start_inspection(&ladder());
        ctl.exit();
        assert_eq!(ctl.state(), SessionState::NoSession);
        assert_eq!(nav.0.load(Ordering::SeqCst), 1);
    }

    // ── Edits ────────────────────────────────────────────────────────

    #[test]
    fn test_set_result_toggles() {
        let (mut ctl, _) = started();
        ctl.set_item_result(1, 1, Some(ItemResult::Fail)).unwrap();
        assert_eq!(ctl.answered_count(), 1);
        ctl.set_item_result(1, 1, Some(ItemResult::Fail)).unwrap();
        assert_eq!(ctl.answered_count(), 0);
    }

    #[test]
    fn test_out_of_range_edit_leaves_state() {
        let (mut ctl, _) = started();
        ctl.set_item_result(0, 0, Some(ItemResult::Pass)).unwrap();
        let before = ctl.session().unwrap().tree().clone();

        assert_eq!(
            ctl.set_item_result(0, 99, Some(ItemResult::Fail)),
            Err(SessionError::ItemOutOfRange {
                section: 0,
                item: 99,
                count: 6
            })
        );
        assert_eq!(
            ctl.set_item_notes(7, 0, "x"),
            Err(SessionError::SectionOutOfRange {
                section: 7,
                count: 3
            })
        );
        assert_eq!(
            ctl.toggle_section(3),
            Err(SessionError::SectionOutOfRange {
                section: 3,
                count: 3
            })
        );
        assert_eq!(ctl.session().unwrap().tree(), &before);
    }

    #[test]
    fn test_set_notes_leaves_siblings() {
        let (mut ctl, _) = started();
        ctl.set_item_result(1, 0, Some(ItemResult::Pass)).unwrap();
        ctl.set_item_result(1, 2, Some(ItemResult::Fail)).unwrap();
        ctl.set_item_notes(1, 2, "hinge seized").unwrap();
        ctl.set_item_result(1, 1, Some(ItemResult::Fail)).unwrap();
        ctl.toggle_section(2).unwrap();
        let before = ctl.session().unwrap().tree().clone();

        ctl.set_item_notes(1, 1, "worn feet").unwrap();

        let after = ctl.session().unwrap().tree();
        assert_eq!(after.item(1, 1).unwrap().notes, "worn feet");
        assert_eq!(after.item(1, 1).unwrap().result, Some(ItemResult::Fail));
        for (s, (old, new)) in before.sections().iter().zip(after.sections()).enumerate() {
            assert_eq!(old.expanded, new.expanded);
            for (i, (a, b)) in old.items.iter().zip(&new.items).enumerate() {
                if (s, i) != (1, 1) {
                    assert_eq!(a, b, "item {s}.{i} changed");
                }
            }
        }
        assert_eq!(after.item(1, 2).unwrap().notes, "hinge seized");
        assert_eq!(after.counts(), before.counts());
    }

    #[test]
    fn test_edits_without_session_rejected() {
        let mut ctl = ChecklistController::new();
        assert_eq!(
            ctl.set_item_result(0, 0, Some(ItemResult::Pass)),
            Err(SessionError::NoActiveSession)
        );
        assert_eq!(ctl.toggle_section(0), Err(SessionError::NoActiveSession));
        assert_eq!(
            ctl.set_inspector_name("J Smith"),
            Err(SessionError::NoActiveSession)
        );
    }

    #[test]
    fn test_toggle_section() {
        let (mut ctl, _) = started();
        ctl.toggle_section(2).unwrap();
        let expanded: Vec<bool> = ctl
            .session()
            .unwrap()
            .tree()
            .sections()
            .iter()
            .map(|s| s.expanded)
            .collect();
        assert_eq!(expanded, [true, false, true]);
    }

    #[test]
    fn test_progress_tracks_answers() {
        let (mut ctl, _) = started();
        for i in 0..4 {
            ctl.set_item_result(0, i, Some(ItemResult::Pass)).unwrap();
        }
        // 4 / 16 = 25%
        assert_eq!(ctl.progress(), 25);
        ctl.set_item_result(1, 0, Some(ItemResult::NotApplicable)).unwrap();
        // 5 / 16 = 31.25%
        assert_eq!(ctl.progress(), 31);
    }

    // ── Submission ───────────────────────────────────────────────────

    #[test]
    fn test_submit_without_session() {
        let mut ctl = ChecklistController::new();
        assert_eq!(
            ctl.submit_inspection().unwrap_err(),
            SubmitError::NoActiveSession
        );
    }

    #[test]
    fn test_submit_preconditions_leave_state() {
        let (mut ctl, recorder) = started();
        ctl.set_inspector_name("J Smith").unwrap();
        assert_eq!(
            ctl.submit_inspection().unwrap_err(),
            SubmitError::NothingAnswered
        );

        ctl.set_inspector_name("").unwrap();
        ctl.set_item_result(0, 0, Some(ItemResult::Pass)).unwrap();
        assert!(!ctl.can_submit());
        assert_eq!(
            ctl.submit_inspection().unwrap_err(),
            SubmitError::MissingInspector
        );

        assert_eq!(ctl.state(), SessionState::InProgress);
        assert_eq!(ctl.answered_count(), 1);
        assert!(ctl.history().is_empty());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_submit_records_and_clears() {
        let (mut ctl, recorder) = started();
        answer_all(&mut ctl, ItemResult::Pass);
        ctl.set_inspector_name("J Smith").unwrap();
        ctl.set_location("Site A").unwrap();
        ctl.set_additional_notes("All good").unwrap();
        ctl.set_inspection_date(InspectionDate::from_ymd(2026, 10, 19).unwrap())
            .unwrap();
        assert!(ctl.can_submit());

        let record = ctl.submit_inspection().unwrap().clone();
        assert_eq!(record.overall_result, OverallResult::Pass);
        assert_eq!(record.pass_count, 16);
        assert_eq!(record.date.to_string(), "2026-10-19");
        assert_eq!(record.additional_notes, "All good");

        assert_eq!(ctl.state(), SessionState::NoSession);
        assert_eq!(ctl.history().len(), 1);
        assert_eq!(ctl.find_inspection(record.id), Some(&record));

        let notes = recorder.notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, "Inspection completed — PASS");
        assert_eq!(notes[0].inspection_id, record.id);
    }

    #[test]
    fn test_partial_answers_are_advisory() {
        let (mut ctl, recorder) = started();
        ctl.set_item_result(0, 0, Some(ItemResult::Pass)).unwrap();
        ctl.set_inspector_name("J Smith").unwrap();
        let outcome = ctl.submit_inspection().unwrap().overall_result;
        assert_eq!(outcome, OverallResult::Advisory);
        assert_eq!(
            recorder.notifications()[0].message,
            "Inspection completed — ADVISORY"
        );
    }

    #[test]
    fn test_history_most_recent_first_with_unique_ids() {
        let (mut ctl, _) = started();
        ctl.set_item_result(0, 0, Some(ItemResult::Pass)).unwrap();
        ctl.set_inspector_name("A").unwrap();
        let first = ctl.submit_inspection().unwrap().id;

        ctl.start_inspection(&ladder());
        ctl.set_item_result(0, 0, Some(ItemResult::Fail)).unwrap();
        ctl.set_inspector_name("B").unwrap();
        let second = ctl.submit_inspection().unwrap().id;

        assert!(second > first);
        let names: Vec<&str> = ctl
            .history()
            .iter()
            .map(|r| r.inspector_name.as_str())
            .collect();
        assert_eq!(names, ["B", "A"]);

        let summary = ctl.history_summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.advisory, 1);
    }
}
