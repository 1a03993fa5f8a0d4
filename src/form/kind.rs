use serde::{Deserialize, Serialize};
use std::fmt;

/// Every component type a form can contain, both input fields and layout containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    // Inputs
    Text,
    Email,
    Password,
    Tel,
    PhoneNumber,
    Number,
    Url,
    Textarea,
    Select,
    Checkbox,
    Switch,
    Radio,
    Date,
    #[serde(rename = "richtext")]
    RichText,
    Signature,
    Currency,
    DynamicList,

    // Layout
    Grid,
    Flex,
    Row,
    Column,
    Section,
}

impl FieldKind {
    pub const ALL: [FieldKind; 22] = [
        FieldKind::Text,
        FieldKind::Email,
        FieldKind::Password,
        FieldKind::Tel,
        FieldKind::PhoneNumber,
        FieldKind::Number,
        FieldKind::Url,
        FieldKind::Textarea,
        FieldKind::Select,
        FieldKind::Checkbox,
        FieldKind::Switch,
        FieldKind::Radio,
        FieldKind::Date,
        FieldKind::RichText,
        FieldKind::Signature,
        FieldKind::Currency,
        FieldKind::DynamicList,
        FieldKind::Grid,
        FieldKind::Flex,
        FieldKind::Row,
        FieldKind::Column,
        FieldKind::Section,
    ];

    /// The name used in persisted documents and generated identifiers.
    pub fn wire_name(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Tel => "tel",
            FieldKind::PhoneNumber => "phoneNumber",
            FieldKind::Number => "number",
            FieldKind::Url => "url",
            FieldKind::Textarea => "textarea",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Switch => "switch",
            FieldKind::Radio => "radio",
            FieldKind::Date => "date",
            FieldKind::RichText => "richtext",
            FieldKind::Signature => "signature",
            FieldKind::Currency => "currency",
            FieldKind::DynamicList => "dynamicList",
            FieldKind::Grid => "grid",
            FieldKind::Flex => "flex",
            FieldKind::Row => "row",
            FieldKind::Column => "column",
            FieldKind::Section => "section",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.wire_name() == name)
    }

    /// Layout containers carry no value of their own; field enumeration walks through them.
    pub fn is_layout(self) -> bool {
        matches!(
            self,
            FieldKind::Grid
                | FieldKind::Flex
                | FieldKind::Row
                | FieldKind::Column
                | FieldKind::Section
        )
    }

    /// Whether nodes of this kind own a `children` list.
    ///
    /// A dynamic list owns children (its item template) but is still a single array-valued
    /// field, so it is not a layout kind.
    pub fn has_children(self) -> bool {
        self.is_layout() || self == FieldKind::DynamicList
    }

    /// Kinds whose form value is a boolean.
    pub fn is_boolean(self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Switch)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde() {
        for kind in FieldKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.wire_name().to_string()));
            assert_eq!(FieldKind::from_wire_name(kind.wire_name()), Some(kind));
        }
    }

    #[test]
    fn dynamic_list_owns_children_but_is_not_layout() {
        assert!(FieldKind::DynamicList.has_children());
        assert!(!FieldKind::DynamicList.is_layout());
        assert!(FieldKind::Section.is_layout());
        assert!(!FieldKind::Email.has_children());
    }
}
