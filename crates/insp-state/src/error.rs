//! Errors returned by the session controller.
//!
//! Every rejected operation leaves the controller state exactly as it was.

use thiserror::Error;

/// Errors from editing an in-progress inspection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The operation needs an inspection in progress.
    #[error("no inspection in progress")]
    NoActiveSession,

    /// Section index is past the end of the tree.
    #[error("section {section} out of range ({count} sections)")]
    SectionOutOfRange {
        /// Requested section index.
        section: usize,
        /// Number of sections.
        count: usize,
    },

    /// Item index is past the end of its section.
    #[error("item {item} out of range in section {section} ({count} items)")]
    ItemOutOfRange {
        /// Section index.
        section: usize,
        /// Requested item index.
        item: usize,
        /// Number of items in the section.
        count: usize,
    },
}

/// Reasons a submission is refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// There is nothing to submit.
    #[error("no inspection in progress")]
    NoActiveSession,

    /// No item has a result yet.
    #[error("at least one item must be answered before submitting")]
    NothingAnswered,

    /// The inspector name is empty or whitespace.
    #[error("inspector name is required")]
    MissingInspector,
}
