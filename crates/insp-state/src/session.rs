//! # Active Session
//!
//! Everything about the one inspection in progress, held as a single value
//! so the template reference, tree and form fields can never disagree.
//!
//! ## States
//!
//! ```text
//! NoSession ──start──▶ InProgress ──submit──▶ NoSession
//!                          │
//!                          └──cancel──▶ NoSession
//! ```
//!
//! Within `InProgress` items and sections may be edited in any order.

use serde::{Deserialize, Serialize};

use insp_catalog::ChecklistTemplate;
use insp_core::{InspectionDate, InspectionId, SessionId, TemplateId, Timestamp};

use crate::error::{SessionError, SubmitError};
use crate::record::CompletedInspection;
use crate::scoring::ResultCounts;
use crate::tree::ChecklistTree;

/// Whether an inspection is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// No inspection in progress.
    NoSession,
    /// An inspection is being filled in.
    InProgress,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NoSession => "NO_SESSION",
            Self::InProgress => "IN_PROGRESS",
        };
        f.write_str(s)
    }
}

/// The inspection currently being filled in.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    id: SessionId,
    template_id: TemplateId,
    template_title: String,
    regulation: String,
    tree: ChecklistTree,
    inspector_name: String,
    location: String,
    additional_notes: String,
    date: InspectionDate,
    started_at: Timestamp,
}

impl ActiveSession {
    /// Start a session on a template, dated today.
    pub fn start(template: &ChecklistTemplate) -> Self {
        Self {
            id: SessionId::new(),
            template_id: template.id.clone(),
            template_title: template.title.clone(),
            regulation: template.regulation.clone(),
            tree: ChecklistTree::from_template(template),
            inspector_name: String::new(),
            location: String::new(),
            additional_notes: String::new(),
            date: InspectionDate::today(),
            started_at: Timestamp::now(),
        }
    }

    /// Log-correlation id of this session.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Id of the template the session was started from.
    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    /// Title of the template.
    pub fn template_title(&self) -> &str {
        &self.template_title
    }

    /// Regulation cited by the template.
    pub fn regulation(&self) -> &str {
        &self.regulation
    }

    /// Current section/item tree.
    pub fn tree(&self) -> &ChecklistTree {
        &self.tree
    }

    /// Inspector name as entered.
    pub fn inspector_name(&self) -> &str {
        &self.inspector_name
    }

    /// Location as entered.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Additional notes as entered.
    pub fn additional_notes(&self) -> &str {
        &self.additional_notes
    }

    /// Date the inspection is recorded against.
    pub fn date(&self) -> InspectionDate {
        self.date
    }

    /// When the session was started.
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// Tally of the current tree.
    pub fn counts(&self) -> ResultCounts {
        self.tree.counts()
    }

    /// Completion percentage of the current tree.
    pub fn progress(&self) -> u32 {
        self.counts().progress()
    }

    /// Check the submission preconditions.
    pub fn submission_check(&self) -> Result<(), SubmitError> {
        if self.counts().answered == 0 {
            return Err(SubmitError::NothingAnswered);
        }
        if self.inspector_name.trim().is_empty() {
            return Err(SubmitError::MissingInspector);
        }
        Ok(())
    }

    /// Explain why `(s, i)` does not address an item, if it doesn't.
    pub(crate) fn check_item_index(&self, s: usize, i: usize) -> Result<(), SessionError> {
        let sections = self.tree.sections();
        let section = sections.get(s).ok_or(SessionError::SectionOutOfRange {
            section: s,
            count: sections.len(),
        })?;
        if i >= section.items.len() {
            return Err(SessionError::ItemOutOfRange {
                section: s,
                item: i,
                count: section.items.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn replace_tree(&mut self, tree: ChecklistTree) {
        self.tree = tree;
    }

    pub(crate) fn set_inspector_name(&mut self, name: &str) {
        self.inspector_name = name.to_string();
    }

    pub(crate) fn set_location(&mut self, location: &str) {
        self.location = location.to_string();
    }

    pub(crate) fn set_additional_notes(&mut self, notes: &str) {
        self.additional_notes = notes.to_string();
    }

    pub(crate) fn set_date(&mut self, date: InspectionDate) {
        self.date = date;
    }

    /// Freeze the session into a completed record.
    pub(crate) fn into_record(self, id: InspectionId, created_at: Timestamp) -> CompletedInspection {
        let counts = self.tree.counts();
        CompletedInspection {
            id,
            template_id: self.template_id,
            template_title: self.template_title,
            regulation: self.regulation,
            location: self.location.trim().to_string(),
            inspector_name: self.inspector_name.trim().to_string(),
            date: self.date,
            sections: self.tree,
            overall_result: counts.overall_result(),
            pass_count: counts.pass,
            fail_count: counts.fail,
            na_count: counts.na,
            total_items: counts.total,
            additional_notes: self.additional_notes,
            created_at,
        }
    }
}
