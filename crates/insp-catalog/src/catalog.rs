//! # Template Catalog
//!
//! An ordered collection of templates with unique ids. The built-in catalog
//! is the starting point; extra templates can be merged in from files.

use std::path::Path;
use std::sync::Arc;

use crate::builtin::builtin_templates;
use crate::error::{CatalogError, CatalogResult};
use crate::parser::load_templates;
use crate::template::ChecklistTemplate;

/// An ordered, id-unique set of checklist templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Arc<ChecklistTemplate>>,
}

impl TemplateCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of built-in templates.
    pub fn builtin() -> Self {
        Self {
            templates: builtin_templates().into_iter().map(Arc::new).collect(),
        }
    }

    /// Validate and append a template. Rejects a duplicate id.
    pub fn insert(&mut self, template: ChecklistTemplate) -> CatalogResult<()> {
        template.validate()?;
        if self.templates.iter().any(|t| t.id == template.id) {
            return Err(CatalogError::DuplicateTemplate {
                id: template.id.to_string(),
            });
        }
        self.templates.push(Arc::new(template));
        Ok(())
    }

    /// Load a template file and insert every template it holds.
    ///
    /// The merge is all-or-nothing: if any template in the file is invalid,
    /// repeats an id within the file, or clashes with a template already in
    /// the catalog, nothing is inserted.
    pub fn extend_from_file(&mut self, path: &Path) -> CatalogResult<usize> {
        let templates = load_templates(path)?;
        for (n, template) in templates.iter().enumerate() {
            let clashes = self.templates.iter().any(|t| t.id == template.id)
                || templates[..n].iter().any(|t| t.id == template.id);
            if clashes {
                return Err(CatalogError::DuplicateTemplate {
                    id: template.id.to_string(),
                });
            }
        }
        let count = templates.len();
        self.templates.extend(templates.into_iter().map(Arc::new));
        tracing::info!(path = %path.display(), count, "merged templates into catalog");
        Ok(count)
    }

    /// Look up a template by exact id.
    pub fn get(&self, id: &str) -> Option<&Arc<ChecklistTemplate>> {
        self.templates.iter().find(|t| t.id.as_str() == id)
    }

    /// Resolve a user-supplied query to a single template.
    ///
    /// Tries, in order: exact id, case-insensitive title, unique id prefix.
    pub fn resolve(&self, query: &str) -> CatalogResult<&Arc<ChecklistTemplate>> {
        let query = query.trim();
        if let Some(t) = self.get(query) {
            return Ok(t);
        }
        if let Some(t) = self
            .templates
            .iter()
            .find(|t| t.title.eq_ignore_ascii_case(query))
        {
            return Ok(t);
        }

        let matches: Vec<&Arc<ChecklistTemplate>> = if query.is_empty() {
            Vec::new()
        } else {
            self.templates
                .iter()
                .filter(|t| t.id.as_str().starts_with(query))
                .collect()
        };
        match matches.as_slice() {
            [single] => Ok(*single),
            [] => Err(CatalogError::UnknownTemplate {
                query: query.to_string(),
            }),
            many => Err(CatalogError::AmbiguousTemplate {
                query: query.to_string(),
                candidates: many.iter().map(|t| t.id.to_string()).collect(),
            }),
        }
    }

    /// Iterate templates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ChecklistTemplate>> {
        self.templates.iter()
    }

    /// Template ids in catalog order.
    pub fn ids(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.id.as_str()).collect()
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
