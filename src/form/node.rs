use super::{Condition, FieldKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open property bag of a component (label, placeholder, limits, options, layout parameters,
/// custom validation source, custom JSON props, help text, ...).
pub type Properties = Map<String, Value>;

/// One element of the form definition tree: an input field or a layout container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub name: String,
    #[serde(default)]
    pub props: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ComponentNode>>,
    /// Derived from the tree structure; recomputed after every mutation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl ComponentNode {
    /// Creates a node with empty properties, children present iff the kind owns any.
    pub fn new(id: impl Into<String>, kind: FieldKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            props: Properties::new(),
            children: kind.has_children().then(Vec::new),
            parent_id: None,
            conditions: Vec::new(),
        }
    }

    pub fn with_prop(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.props.insert(key.to_string(), value.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_children(mut self, children: Vec<ComponentNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn children(&self) -> &[ComponentNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key).filter(|v| !v.is_null())
    }

    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.prop(key).and_then(Value::as_str)
    }

    /// Reads a numeric property, accepting numbers and numeric strings.
    pub fn prop_f64(&self, key: &str) -> Option<f64> {
        match self.prop(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// A numeric property that is present and non-zero; zero means "no limit".
    pub fn prop_limit(&self, key: &str) -> Option<f64> {
        self.prop_f64(key).filter(|n| *n != 0.0)
    }

    pub fn prop_bool(&self, key: &str) -> bool {
        matches!(self.prop(key), Some(Value::Bool(true)))
    }

    pub fn is_required(&self) -> bool {
        self.prop_bool("required")
    }

    /// The user-facing label, falling back to the field name.
    pub fn label(&self) -> &str {
        self.prop_str("label").unwrap_or(&self.name)
    }

    /// Enforces `children.is_some() == kind.has_children()`.
    pub(crate) fn normalize_children(&mut self) {
        match (self.kind.has_children(), self.children.is_some()) {
            (true, false) => self.children = Some(Vec::new()),
            (false, true) => {
                log::warn!(
                    "Dropping children of '{}' ({}): kind cannot hold children",
                    self.id,
                    self.kind
                );
                self.children = None;
            }
            _ => {}
        }
        if let Some(children) = self.children.as_mut() {
            for child in children {
                child.normalize_children();
            }
        }
    }
}
