use super::ComponentNode;
use crate::error::ImportError;
use crate::tree;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;

pub const DOCUMENT_VERSION: &str = "1.0.0";
const IMPORTED_FORM_NAME: &str = "ImportedForm";

/// The persisted form: a name, the root-level forest and provenance metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    pub name: String,
    pub components: Vec<ComponentNode>,
    pub version: String,
    pub created_at: DateTime<Utc>,
}

impl FormDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            version: DOCUMENT_VERSION.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Parses a persisted document.
    ///
    /// `components` must be present and be an array; anything else is rejected. Parent links are
    /// recomputed from the tree, so stale `parentId` values in the input are ignored.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let raw: Value =
            serde_json::from_str(json).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

        let components = match raw.get("components") {
            None | Some(Value::Null) => return Err(ImportError::MissingComponents),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ImportError::ComponentsNotArray {
                    found: json_type_name(other).to_string(),
                });
            }
        };

        let mut forest = Vec::with_capacity(components.len());
        for (index, item) in components.iter().enumerate() {
            let mut node: ComponentNode =
                serde_json::from_value(item.clone()).map_err(|e| ImportError::InvalidComponent {
                    index,
                    message: e.to_string(),
                })?;
            node.normalize_children();
            forest.push(node);
        }

        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(IMPORTED_FORM_NAME)
            .to_string();
        let version = raw
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or(DOCUMENT_VERSION)
            .to_string();
        let created_at = raw
            .get("createdAt")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        log::debug!(
            "Imported form '{}' with {} root component(s)",
            name,
            forest.len()
        );

        Ok(Self {
            name,
            components: tree::relink_parents(forest),
            version,
            created_at,
        })
    }

    pub fn from_file(path: &str) -> Result<Self, ImportError> {
        let content = fs::read_to_string(path).map_err(|e| ImportError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Pretty-printed JSON in the persisted format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// File name used when exporting: whitespace runs become dashes, lowercased.
    pub fn export_file_name(&self) -> String {
        let slug = self
            .name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        format!("{}.json", slug)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_array_components() {
        let err = FormDocument::from_json(r#"{"components": "not-an-array"}"#).unwrap_err();
        assert!(matches!(err, ImportError::ComponentsNotArray { .. }));
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn rejects_missing_components_and_bad_json() {
        assert!(matches!(
            FormDocument::from_json(r#"{"name": "X"}"#),
            Err(ImportError::MissingComponents)
        ));
        assert!(matches!(
            FormDocument::from_json("{not json"),
            Err(ImportError::InvalidJson(_))
        ));
    }

    #[test]
    fn defaults_name_and_relinks_parents() {
        let doc = FormDocument::from_json(
            r#"{"components": [{"id": "s", "type": "section", "name": "section1",
                "children": [{"id": "t", "type": "text", "name": "text1", "parentId": "stale"}]}]}"#,
        )
        .unwrap();
        assert_eq!(doc.name, "ImportedForm");
        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert_eq!(doc.components[0].children()[0].parent_id.as_deref(), Some("s"));
    }

    #[test]
    fn export_file_name_is_slugged() {
        let doc = FormDocument::new("Customer  Intake Form");
        assert_eq!(doc.export_file_name(), "customer-intake-form.json");
    }
}
