//! # Identity Newtypes
//!
//! Newtype wrappers for the identifiers used across the inspection crates.
//! You cannot pass a `TemplateId` where an `InspectionId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::InspError;

/// Maximum length of a template identifier.
const TEMPLATE_ID_MAX_LEN: usize = 64;

/// Identifier of a checklist template in the catalog (e.g. `ladder-inspection`).
///
/// Validated at construction: non-empty, at most 64 characters, lowercase
/// ASCII letters, digits and `-` only. Deserialization runs the same check.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateId(String);

impl TemplateId {
    /// Create a validated template identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, InspError> {
        let id = id.into();
        if id.is_empty() {
            return Err(InspError::Validation(
                "template id must not be empty".to_string(),
            ));
        }
        if id.len() > TEMPLATE_ID_MAX_LEN {
            return Err(InspError::Validation(format!(
                "template id {id:?} exceeds {TEMPLATE_ID_MAX_LEN} characters"
            )));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(InspError::Validation(format!(
                "template id {id:?} may only contain lowercase letters, digits and '-'"
            )));
        }
        Ok(Self(id))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TemplateId {
    type Error = InspError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TemplateId> for String {
    fn from(id: TemplateId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Time-based identifier of a completed inspection: Unix epoch milliseconds
/// at the moment of submission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct InspectionId(u64);

impl InspectionId {
    /// Build an identifier from epoch milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// The epoch milliseconds this identifier encodes.
    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for InspectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for InspectionId {
    type Err = InspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| InspError::Validation(format!("invalid inspection id {s:?}: {e}")))
    }
}

/// Random identifier for one in-progress checklist session.
///
/// Only used to correlate log events; never stored in a completed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}
