//! Template file loading.
//!
//! A template file holds either a single template or a `templates:` list.
//! Files ending in `.json` are parsed with serde_json; everything else is
//! treated as YAML. Every loaded template is validated before it is
//! returned.

use std::path::Path;

use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};
use crate::template::ChecklistTemplate;

#[derive(Deserialize)]
#[serde(untagged)]
enum TemplateFile {
    Many { templates: Vec<ChecklistTemplate> },
    One(ChecklistTemplate),
}

impl TemplateFile {
    fn into_templates(self) -> Vec<ChecklistTemplate> {
        match self {
            Self::Many { templates } => templates,
            Self::One(template) => vec![template],
        }
    }
}

fn read_file(path: &Path) -> CatalogResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::Io(e)
        }
    })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Load and validate every template in a file.
pub fn load_templates(path: &Path) -> CatalogResult<Vec<ChecklistTemplate>> {
    let content = read_file(path)?;
    let file: TemplateFile = if is_json(path) {
        serde_json::from_str(&content).map_err(|e| CatalogError::JsonParse {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        serde_yaml::from_str(&content).map_err(|e| CatalogError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        })?
    };

    let templates = file.into_templates();
    for template in &templates {
        template.validate()?;
    }
    tracing::debug!(path = %path.display(), count = templates.len(), "loaded template file");
    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SINGLE_YAML: &str = r#"
id: rcd-check
title: RCD Check
description: Functional check of an RCD.
regulation: BS 7671 Regulation 643.8
sections:
  - title: Device
    items:
      - Test button operates
      - Rating label legible
"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_single_yaml_template() {
        let f = write_temp(".yaml", SINGLE_YAML);
        let templates = load_templates(f.path()).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id.as_str(), "rcd-check");
        assert_eq!(templates[0].item_count(), 2);
    }

    #[test]
    fn loads_template_list() {
        let yaml = r#"
templates:
  - id: one
    title: One
    sections:
      - title: A
        items: [x]
  - id: two
    title: Two
    sections:
      - title: B
        items: [y, z]
"#;
        let f = write_temp(".yml", yaml);
        let templates = load_templates(f.path()).unwrap();
        let ids: Vec<_> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["one", "two"]);
    }

    #[test]
    fn loads_json_by_extension() {
        let json = r#"{"id":"emergency-lighting","title":"Emergency Lighting",
            "sections":[{"title":"Luminaires","items":["Indicator lit"]}]}"#;
        let f = write_temp(".json", json);
        let templates = load_templates(f.path()).unwrap();
        assert_eq!(templates[0].title, "Emergency Lighting");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_templates(Path::new("/nonexistent/templates.yaml")).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let f = write_temp(".yaml", "id: [unclosed");
        let err = load_templates(f.path()).unwrap_err();
        match err {
            CatalogError::YamlParse { path, .. } => assert_eq!(path, f.path()),
            other => panic!("expected YamlParse, got {other}"),
        }
    }

    #[test]
    fn invalid_template_is_rejected() {
        let yaml = "id: empty\ntitle: Empty\nsections: []\n";
        let f = write_temp(".yaml", yaml);
        let err = load_templates(f.path()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidTemplate { .. }));
    }

    #[test]
    fn invalid_template_id_is_rejected() {
        let yaml = "id: Bad Id\ntitle: Bad\nsections:\n  - title: A\n    items: [x]\n";
        let f = write_temp(".yaml", yaml);
        assert!(load_templates(f.path()).is_err());
    }
}
