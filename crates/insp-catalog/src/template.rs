//! # Checklist Templates
//!
//! A template is fixed reference data: an ordered list of sections, each an
//! ordered list of item texts, plus the regulation the checklist cites.
//! Sessions copy titles and item texts out of a template; the template
//! itself is never mutated at runtime.

use serde::{Deserialize, Serialize};

use insp_core::TemplateId;

use crate::error::{CatalogError, CatalogResult};

/// One section of a checklist template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSection {
    /// Section heading.
    pub title: String,
    /// Item texts, in display order.
    pub items: Vec<String>,
}

/// A checklist template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTemplate {
    /// Catalog identifier.
    pub id: TemplateId,
    /// Human-readable title (e.g. "Ladder Inspection").
    pub title: String,
    /// Short description of what the checklist covers.
    #[serde(default)]
    pub description: String,
    /// Ordered sections.
    pub sections: Vec<TemplateSection>,
    /// Regulatory citation (e.g. "Work at Height Regulations 2005").
    #[serde(default)]
    pub regulation: String,
}

impl ChecklistTemplate {
    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Check structural validity.
    ///
    /// A valid template has a non-blank title and at least one section;
    /// every section has a non-blank title and at least one item, and no
    /// item text is blank.
    pub fn validate(&self) -> CatalogResult<()> {
        let invalid = |reason: String| CatalogError::InvalidTemplate {
            id: self.id.to_string(),
            reason,
        };

        if self.title.trim().is_empty() {
            return Err(invalid("title is empty".to_string()));
        }
        if self.sections.is_empty() {
            return Err(invalid("template has no sections".to_string()));
        }
        for (si, section) in self.sections.iter().enumerate() {
            if section.title.trim().is_empty() {
                return Err(invalid(format!("section {si} has an empty title")));
            }
            if section.items.is_empty() {
                return Err(invalid(format!(
                    "section {si} ({}) has no items",
                    section.title
                )));
            }
            if let Some(ii) = section.items.iter().position(|t| t.trim().is_empty()) {
                return Err(invalid(format!("section {si} item {ii} is blank")));
            }
        }
        Ok(())
    }
}
