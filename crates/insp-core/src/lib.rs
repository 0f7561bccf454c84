//! # insp-core: Foundational Types for Inspection Checklists
//!
//! The leaf crate of the workspace. It defines the primitives every other
//! crate builds on and depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `TemplateId`, `InspectionId` and
//!    `SessionId` are distinct types. A template id cannot be passed where an
//!    inspection id is expected.
//!
//! 2. **UTC-only timestamps.** `Timestamp` is always UTC, seconds precision,
//!    rendered with a `Z` suffix. `InspectionDate` is a plain ISO calendar date.
//!
//! 3. **Digests flow through `CanonicalBytes`.** `sha256_digest()` accepts only
//!    `&CanonicalBytes`, so every record digest is computed over the same
//!    canonical JSON form.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `insp-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, InspError};
pub use identity::{InspectionId, SessionId, TemplateId};
pub use temporal::{InspectionDate, Timestamp};
