//! Column mapping: which Dublin Core selectors feed which output column.
//!
//! The mapping document is a YAML map from output column name to a definition:
//!
//! ```yaml
//! title:
//!   element: title
//!   qualifiers: [none, alternative]
//! ```
//!
//! Top-level key order is kept and becomes the column order of the table.

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, error, info};

use crate::error::{FormatError, Result};

/// Selector for one output column: `dcvalue` nodes whose `element` attribute
/// equals `element` and whose `qualifier` attribute is one of `qualifiers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub element: String,
    pub qualifiers: Vec<String>,
}

impl FieldDefinition {
    pub fn new(element: impl Into<String>, qualifiers: &[&str]) -> Self {
        Self {
            element: element.into(),
            qualifiers: qualifiers.iter().map(|q| q.to_string()).collect(),
        }
    }

    pub fn matches(&self, element: &str, qualifier: Option<&str>) -> bool {
        if self.element != element {
            return false;
        }
        match qualifier {
            Some(q) => self.qualifiers.iter().any(|wanted| wanted == q),
            None => false,
        }
    }
}

/// Ordered column → definition table, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    entries: Vec<(String, FieldDefinition)>,
}

#[derive(Deserialize)]
struct RawDefinition {
    element: String,
    #[serde(default)]
    qualifiers: Option<RawQualifiers>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQualifiers {
    One(String),
    Many(Vec<String>),
}

impl FieldMapping {
    pub fn from_entries(entries: Vec<(String, FieldDefinition)>) -> Self {
        Self { entries }
    }

    /// Parses a mapping document. `source` is only used in error messages.
    pub fn from_yaml_str(content: &str, source: &Path) -> Result<Self> {
        let raw: serde_yaml::Mapping = serde_yaml::from_str(content).map_err(|e| {
            error!(error = %e, path = %source.display(), "[MAPPING] Failed to parse mapping YAML");
            FormatError::MappingParse {
                path: source.to_path_buf(),
                source: e,
            }
        })?;

        let mut entries = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let column = column_name(&key)?;
            let definition: RawDefinition =
                serde_yaml::from_value(value).map_err(|e| FormatError::InvalidMapping {
                    column: column.clone(),
                    reason: e.to_string(),
                })?;
            let qualifiers = match definition.qualifiers {
                None => Vec::new(),
                Some(RawQualifiers::One(q)) => vec![q],
                Some(RawQualifiers::Many(qs)) => qs,
            };
            if qualifiers.is_empty() {
                debug!(column = %column, "[MAPPING] Column has no qualifiers and will always be empty");
            }
            entries.push((
                column,
                FieldDefinition {
                    element: definition.element,
                    qualifiers,
                },
            ));
        }

        info!(columns = entries.len(), path = %source.display(), "[MAPPING] Loaded field mapping");
        Ok(Self { entries })
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(column, _)| column.as_str())
    }

    pub fn get(&self, column: &str) -> Option<&FieldDefinition> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, definition)| definition)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.entries.iter().map(|(c, d)| (c.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn column_name(key: &serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s.clone()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(FormatError::InvalidMapping {
            column: format!("{other:?}"),
            reason: "column names must be scalars".to_string(),
        }),
    }
}
