//! # Completed Inspections
//!
//! A `CompletedInspection` is created exactly once, at submission, and is
//! never mutated afterwards. It is the only durable-shaped output of the
//! controller: any export or persistence layer consumes exactly this shape.

use serde::{Deserialize, Serialize};

use insp_core::{
    sha256_digest, CanonicalBytes, CanonicalizationError, ContentDigest, InspectionDate,
    InspectionId, TemplateId, Timestamp,
};

use crate::scoring::{OverallResult, ResultCounts};
use crate::tree::{ChecklistItem, ChecklistSection, ChecklistTree, ItemResult};

/// A frozen, scored inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedInspection {
    /// Time-based identifier.
    pub id: InspectionId,
    /// Template the inspection was run from.
    pub template_id: TemplateId,
    /// Template title at the time of submission.
    pub template_title: String,
    /// Regulation cited by the template.
    pub regulation: String,
    /// Where the inspection took place.
    pub location: String,
    /// Who carried it out.
    pub inspector_name: String,
    /// Date of the inspection.
    pub date: InspectionDate,
    /// Full section/item tree at submission.
    pub sections: ChecklistTree,
    /// Derived overall result.
    pub overall_result: OverallResult,
    /// Items marked pass.
    pub pass_count: usize,
    /// Items marked fail.
    pub fail_count: usize,
    /// Items marked not applicable.
    pub na_count: usize,
    /// All items.
    pub total_items: usize,
    /// Free-text notes for the whole inspection.
    pub additional_notes: String,
    /// When the record was created.
    pub created_at: Timestamp,
}

impl CompletedInspection {
    /// Tally recomputed from the stored tree.
    pub fn counts(&self) -> ResultCounts {
        self.sections.counts()
    }

    /// Failed items with the section each belongs to, in tree order.
    pub fn failed_items(&self) -> Vec<(&ChecklistSection, &ChecklistItem)> {
        self.sections
            .sections()
            .iter()
            .flat_map(|section| {
                section
                    .items
                    .iter()
                    .filter(|item| item.result == Some(ItemResult::Fail))
                    .map(move |item| (section.as_ref(), item.as_ref()))
            })
            .collect()
    }

    /// SHA-256 digest of the canonical JSON form of this record.
    pub fn digest(&self) -> Result<ContentDigest, CanonicalizationError> {
        let canonical = CanonicalBytes::new(self)?;
        Ok(sha256_digest(&canonical))
    }
}

/// Outcome tallies over a list of completed inspections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Number of records.
    pub total: usize,
    /// Records with overall result PASS.
    pub passed: usize,
    /// Records with overall result FAIL.
    pub failed: usize,
    /// Records with overall result ADVISORY.
    pub advisory: usize,
}

impl HistorySummary {
    /// Summarise a list of records.
    pub fn from_records(records: &[CompletedInspection]) -> Self {
        records.iter().fold(Self::default(), |mut s, r| {
            s.total += 1;
            match r.overall_result {
                OverallResult::Pass => s.passed += 1,
                OverallResult::Fail => s.failed += 1,
                OverallResult::Advisory => s.advisory += 1,
            }
            s
        })
    }
}
