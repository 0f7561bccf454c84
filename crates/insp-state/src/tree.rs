//! # Checklist Tree
//!
//! The section/item tree of one inspection. Updates are pure: every
//! `with_*` method returns a new tree and leaves `self` untouched.
//!
//! ## Structural Sharing
//!
//! Sections and items live behind `Arc`. An update to item `(s, i)` clones
//! the outer section vector (pointer copies), rebuilds section `s` with a
//! new item `i`, and reuses every other `Arc` unchanged. Siblings of the
//! updated item stay pointer-equal to the previous tree, so a renderer can
//! skip them with `Arc::ptr_eq`.
//!
//! ```text
//! tree ──▶ [ S0 ] [ S1' ] [ S2 ]        S1' = S1 with item i replaced
//!                   │
//!                   ▼
//!          [ I0 ] [ Ii' ] [ I2 ] ...    I0, I2, ... shared with S1
//! ```
//!
//! Indices are zero-based `(section, item)` pairs. An out-of-range index
//! yields `None` and no new tree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use insp_catalog::ChecklistTemplate;

use crate::scoring::ResultCounts;

// ─── Item Result ─────────────────────────────────────────────────────

/// The recorded outcome of one checklist item.
///
/// An unanswered item is `Option::<ItemResult>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemResult {
    /// The item meets the requirement.
    Pass,
    /// The item does not meet the requirement.
    Fail,
    /// The item does not apply to this inspection.
    #[serde(rename = "na", alias = "n/a", alias = "n-a", alias = "not-applicable")]
    NotApplicable,
}

impl ItemResult {
    /// Wire name of the result.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::NotApplicable => "na",
        }
    }

    /// Parse a wire or shorthand name, ignoring case: `pass`/`p`,
    /// `fail`/`f`, and `na`/`n/a`/`n-a`/`not-applicable`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pass" | "p" => Some(Self::Pass),
            "fail" | "f" => Some(Self::Fail),
            "na" | "n/a" | "n-a" | "not-applicable" => Some(Self::NotApplicable),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::NotApplicable => "N/A",
        };
        f.pad(s)
    }
}

// ─── Items and Sections ──────────────────────────────────────────────

/// One item of an inspection in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Position-derived identifier (`section-{s}-item-{i}`).
    pub id: String,
    /// Item text copied from the template.
    pub text: String,
    /// Recorded result; `None` while unanswered.
    pub result: Option<ItemResult>,
    /// Free-text notes. Surfaced for failed items, stored for any item.
    pub notes: String,
    /// Photo reference. Always `None` in the current scope.
    pub photo: Option<String>,
}

impl ChecklistItem {
    /// Whether a result has been recorded.
    pub fn is_answered(&self) -> bool {
        self.result.is_some()
    }
}

/// One section of an inspection in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSection {
    /// Position-derived identifier (`section-{s}`).
    pub id: String,
    /// Section title copied from the template.
    pub title: String,
    /// Items in template order.
    pub items: Vec<Arc<ChecklistItem>>,
    /// UI flag: whether the section is shown expanded.
    pub expanded: bool,
}

impl ChecklistSection {
    /// Tally of this section's items.
    pub fn counts(&self) -> ResultCounts {
        ResultCounts::tally(self.items.iter().map(|i| i.as_ref()))
    }
}

// ─── Tree ────────────────────────────────────────────────────────────

/// The full section/item tree of one inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistTree {
    sections: Vec<Arc<ChecklistSection>>,
}

impl ChecklistTree {
    /// Build a fresh tree from a template.
    ///
    /// Every item starts unanswered with empty notes and no photo. The first
    /// section is expanded; all others start collapsed.
    pub fn from_template(template: &ChecklistTemplate) -> Self {
        let sections = template
            .sections
            .iter()
            .enumerate()
            .map(|(si, section)| {
                Arc::new(ChecklistSection {
                    id: format!("section-{si}"),
                    title: section.title.clone(),
                    items: section
                        .items
                        .iter()
                        .enumerate()
                        .map(|(ii, text)| {
                            Arc::new(ChecklistItem {
                                id: format!("section-{si}-item-{ii}"),
                                text: text.clone(),
                                result: None,
                                notes: String::new(),
                                photo: None,
                            })
                        })
                        .collect(),
                    expanded: si == 0,
                })
            })
            .collect();
        Self { sections }
    }

    /// Sections in template order.
    pub fn sections(&self) -> &[Arc<ChecklistSection>] {
        &self.sections
    }

    /// Section at `s`, if in range.
    pub fn section(&self, s: usize) -> Option<&ChecklistSection> {
        self.sections.get(s).map(|s| s.as_ref())
    }

    /// Item at `(s, i)`, if in range.
    pub fn item(&self, s: usize, i: usize) -> Option<&ChecklistItem> {
        self.sections.get(s)?.items.get(i).map(|i| i.as_ref())
    }

    /// All items in section order, then item order.
    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter().map(|i| i.as_ref()))
    }

    /// Tally of every item in the tree.
    pub fn counts(&self) -> ResultCounts {
        ResultCounts::tally(self.items())
    }

    /// New tree with the result of `(s, i)` set.
    ///
    /// Setting the result the item already holds clears it (toggle), as does
    /// passing `None`.
    pub fn with_item_result(&self, s: usize, i: usize, result: Option<ItemResult>) -> Option<Self> {
        self.with_item(s, i, |item| {
            item.result = match (item.result, result) {
                (Some(current), Some(requested)) if current == requested => None,
                (_, requested) => requested,
            };
        })
    }

    /// New tree with the notes of `(s, i)` replaced.
    pub fn with_item_notes(&self, s: usize, i: usize, notes: &str) -> Option<Self> {
        self.with_item(s, i, |item| item.notes = notes.to_string())
    }

    /// New tree with the expanded flag of section `s` flipped.
    pub fn with_section_toggled(&self, s: usize) -> Option<Self> {
        let section = self.sections.get(s)?;
        let mut updated = ChecklistSection::clone(section);
        updated.expanded = !updated.expanded;

        let mut sections = self.sections.clone();
        sections[s] = Arc::new(updated);
        Some(Self { sections })
    }

    fn with_item(&self, s: usize, i: usize, update: impl FnOnce(&mut ChecklistItem)) -> Option<Self> {
        let section = self.sections.get(s)?;
        let item = section.items.get(i)?;

        let mut new_item = ChecklistItem::clone(item);
        update(&mut new_item);

        let mut new_section = ChecklistSection::clone(section);
        new_section.items[i] = Arc::new(new_item);

        let mut sections = self.sections.clone();
        sections[s] = Arc::new(new_section);
        Some(Self { sections })
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
