//! # insp-catalog: Checklist Template Catalog
//!
//! Static reference data for inspection checklists:
//!
//! - **Template** (`template.rs`): the `ChecklistTemplate` data model and
//!   its structural validation.
//!
//! - **Built-in** (`builtin.rs`): the compiled-in templates (ladders,
//!   consumer units, portable appliances, test instruments, safe isolation).
//!
//! - **Catalog** (`catalog.rs`): an ordered, id-unique collection of
//!   templates with lookup by id, title or unique id prefix.
//!
//! - **Parser** (`parser.rs`): loading extra templates from YAML or JSON
//!   files with file-path error context.
//!
//! Templates are never mutated once they enter a catalog; sessions copy
//! titles and item texts out of them.

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod parser;
pub mod template;

pub use catalog::TemplateCatalog;
pub use error::{CatalogError, CatalogResult};
pub use parser::load_templates;
pub use template::{ChecklistTemplate, TemplateSection};
