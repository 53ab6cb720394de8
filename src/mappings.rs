//! Override mapping file parsing.
//!
//! An optional `_mappings.yml` file next to the template files supplies
//! per-template metadata used when the remote system has no existing
//! value:
//!
//! ```yaml
//! templates:
//!   - name: welcome
//!     from_email: hello@example.com
//!     labels: [onboarding]
//!     defaults:
//!       from_name: Acme Support
//! ```
//!
//! Each entry's `defaults` sub-object is flattened onto the entry at load
//! time; a field set in `defaults` replaces the same field set at the
//! entry's top level.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{MailsyncError, Result};

/// Root structure of the mapping file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingsFile {
    #[serde(default)]
    pub templates: Vec<MappingEntry>,
}

/// One entry of the mapping file, before flattening.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingEntry {
    /// Base template name (file stem, without suffix).
    pub name: String,

    #[serde(flatten)]
    pub fields: TemplateOverride,

    #[serde(default)]
    pub defaults: Option<TemplateOverride>,
}

/// Metadata overrides for one template.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemplateOverride {
    pub from_email: Option<String>,
    pub from_name: Option<String>,
    pub subject: Option<String>,
    pub labels: Option<Vec<String>>,
}

impl MappingEntry {
    /// Flatten the `defaults` sub-object onto the entry.
    pub fn flatten(self) -> TemplateOverride {
        let Some(defaults) = self.defaults else {
            return self.fields;
        };
        TemplateOverride {
            from_email: defaults.from_email.or(self.fields.from_email),
            from_name: defaults.from_name.or(self.fields.from_name),
            subject: defaults.subject.or(self.fields.subject),
            labels: defaults.labels.or(self.fields.labels),
        }
    }
}

/// Load and flatten the mapping file, indexed by lowercased base name.
pub fn load_mappings(path: &Path) -> Result<BTreeMap<String, TemplateOverride>> {
    let content = fs::read_to_string(path)?;
    let file: MappingsFile =
        serde_yaml::from_str(&content).map_err(|e| MailsyncError::MappingsParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut overrides = BTreeMap::new();
    for entry in file.templates {
        let name = entry.name.to_lowercase();
        overrides.insert(name, entry.flatten());
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load(yaml: &str) -> BTreeMap<String, TemplateOverride> {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("_mappings.yml");
        fs::write(&path, yaml).unwrap();
        load_mappings(&path).unwrap()
    }

    #[test]
    fn parses_entries_with_top_level_fields() {
        let overrides = load(
            r#"
templates:
  - name: welcome
    from_email: hello@example.com
    subject: Welcome aboard
    labels: [onboarding]
"#,
        );

        let welcome = &overrides["welcome"];
        assert_eq!(welcome.from_email.as_deref(), Some("hello@example.com"));
        assert_eq!(welcome.subject.as_deref(), Some("Welcome aboard"));
        assert_eq!(welcome.labels.as_deref(), Some(&["onboarding".to_string()][..]));
    }

    #[test]
    fn defaults_flatten_onto_the_entry() {
        let overrides = load(
            r#"
templates:
  - name: welcome
    defaults:
      from_name: Acme
"#,
        );

        assert_eq!(overrides["welcome"].from_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn defaults_win_over_top_level_fields() {
        let overrides = load(
            r#"
templates:
  - name: welcome
    from_name: Top Level
    defaults:
      from_name: From Defaults
"#,
        );

        assert_eq!(
            overrides["welcome"].from_name.as_deref(),
            Some("From Defaults")
        );
    }

    #[test]
    fn entries_index_by_lowercased_name() {
        let overrides = load(
            r#"
templates:
  - name: Welcome
    subject: hi
"#,
        );

        assert!(overrides.contains_key("welcome"));
        assert!(!overrides.contains_key("Welcome"));
    }

    #[test]
    fn empty_file_yields_no_overrides() {
        let overrides = load("templates: []\n");
        assert!(overrides.is_empty());
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("_mappings.yml");
        fs::write(&path, "templates: [[[").unwrap();

        let err = load_mappings(&path).unwrap_err();
        assert!(matches!(err, MailsyncError::MappingsParseError { .. }));
    }
}
