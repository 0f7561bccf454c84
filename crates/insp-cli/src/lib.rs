//! # insp-cli: Inspection Checklist CLI
//!
//! Provides the `insp` command-line interface over the checklist
//! controller.
//!
//! ## Subcommands
//!
//! - `insp templates list|show`: Browse the template catalog.
//! - `insp run`: Scripted inspection from an answers file.
//! - `insp session`: Interactive session shell on stdin.
//!
//! ```bash
//! insp templates show ladder-inspection
//! insp run answers.yaml --json
//! insp --config insp.yaml session --template ladder
//! ```
//!
//! Every handler returns the process exit code. `insp run` exits 2 when the
//! inspection fails, so it can gate a script.

pub mod config;
pub mod report;
pub mod run;
pub mod session;
pub mod templates;
