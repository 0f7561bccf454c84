//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! template_paths:
//!   - templates/site-extras.yaml
//! inspector: J Smith
//! location: Site A
//! ```
//!
//! Relative template paths resolve against the directory holding the config
//! file, not the current directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use insp_catalog::TemplateCatalog;

/// Settings loaded from the `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Extra template files merged into the built-in catalog.
    #[serde(default)]
    pub template_paths: Vec<PathBuf>,
    /// Inspector name pre-filled into new sessions.
    #[serde(default)]
    pub inspector: Option<String>,
    /// Location pre-filled into new sessions.
    #[serde(default)]
    pub location: Option<String>,
}

impl CliConfig {
    /// Load the config file at `path`, or defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let base = path.parent().unwrap_or(Path::new("."));
        config.template_paths = config
            .template_paths
            .into_iter()
            .map(|p| resolve_path(&p, base))
            .collect();

        tracing::debug!(
            path = %path.display(),
            template_files = config.template_paths.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// The built-in catalog extended with every configured template file.
    pub fn build_catalog(&self) -> Result<TemplateCatalog> {
        let mut catalog = TemplateCatalog::builtin();
        for path in &self.template_paths {
            catalog
                .extend_from_file(path)
                .with_context(|| format!("failed to load templates from {}", path.display()))?;
        }
        Ok(catalog)
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
