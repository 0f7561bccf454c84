//! # Scoring
//!
//! Counts, completion percentage and overall result, recomputed on demand
//! from the items. Nothing here is cached.
//!
//! ## Overall Result
//!
//! ```text
//! fail_count > 0                      ──▶ FAIL
//! pass_count < total - na_count       ──▶ ADVISORY
//! otherwise                           ──▶ PASS
//! ```
//!
//! Unanswered items count against the pass comparison exactly like a
//! missing pass: an inspection with no failures but some unanswered items
//! is ADVISORY.

use serde::{Deserialize, Serialize};

use crate::tree::{ChecklistItem, ItemResult};

/// The derived outcome of an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallResult {
    /// Every applicable item passed.
    Pass,
    /// At least one item failed.
    Fail,
    /// No failures, but not every applicable item passed.
    Advisory,
}

impl OverallResult {
    /// Wire name of the result.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Advisory => "advisory",
        }
    }
}

impl std::fmt::Display for OverallResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Advisory => "ADVISORY",
        };
        f.write_str(s)
    }
}

/// Per-result tallies over a set of items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCounts {
    /// Items marked pass.
    pub pass: usize,
    /// Items marked fail.
    pub fail: usize,
    /// Items marked not applicable.
    pub na: usize,
    /// Items with any result.
    pub answered: usize,
    /// All items.
    pub total: usize,
}

impl ResultCounts {
    /// Tally the given items.
    pub fn tally<'a>(items: impl IntoIterator<Item = &'a ChecklistItem>) -> Self {
        items.into_iter().fold(Self::default(), |mut c, item| {
            c.total += 1;
            match item.result {
                Some(ItemResult::Pass) => c.pass += 1,
                Some(ItemResult::Fail) => c.fail += 1,
                Some(ItemResult::NotApplicable) => c.na += 1,
                None => {}
            }
            if item.result.is_some() {
                c.answered += 1;
            }
            c
        })
    }

    /// Items without a result.
    pub fn unanswered(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }

    /// The overall result implied by these counts.
    pub fn overall_result(&self) -> OverallResult {
        if self.fail > 0 {
            OverallResult::Fail
        } else if self.pass < self.total.saturating_sub(self.na) {
            OverallResult::Advisory
        } else {
            OverallResult::Pass
        }
    }

    /// Completion percentage: `round(answered / total * 100)`, half rounding
    /// up. Zero when there are no items.
    pub fn progress(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.answered * 200 + self.total) / (2 * self.total);
        u32::try_from(pct).unwrap_or(100)
    }
}
