//! Default components, as dropped from the component palette.
use super::{ComponentNode, FieldKind, Properties};
use crate::tree;
use serde_json::{Value, json};
use uuid::Uuid;

/// Creates a fresh node of `kind` ready to be inserted into `forest`.
///
/// The id is `"{kind}_{uuid}"` and never reused. The name is the kind followed by one more than
/// the number of nodes of that kind already in the forest (`text1`, `text2`, ...). `parent_id`
/// is only a hint; the tree recomputes it on insertion.
pub fn create_component(
    kind: FieldKind,
    forest: &[ComponentNode],
    parent_id: Option<&str>,
) -> ComponentNode {
    let id = generate_id(kind);
    let name = format!("{}{}", kind.wire_name(), tree::count_kind(forest, kind) + 1);

    let mut node = ComponentNode::new(id, kind, name);
    node.props = default_props(kind);
    node.parent_id = parent_id.map(str::to_string);
    node
}

pub fn generate_id(kind: FieldKind) -> String {
    format!("{}_{}", kind.wire_name(), Uuid::new_v4())
}

/// The property set a new component of `kind` starts with.
pub fn default_props(kind: FieldKind) -> Properties {
    let mut props = Properties::new();
    props.insert("label".to_string(), json!(default_label(kind)));
    props.insert("required".to_string(), json!(false));

    let extra = match kind {
        FieldKind::Text => json!({ "placeholder": "Enter text", "minLength": 0, "maxLength": 100 }),
        FieldKind::Email => json!({ "placeholder": "Enter email address" }),
        FieldKind::Password => json!({ "placeholder": "Enter password", "minLength": 8 }),
        FieldKind::Tel => json!({ "placeholder": "Enter phone number" }),
        FieldKind::PhoneNumber => {
            json!({ "placeholder": "Enter phone number", "format": "(###) ###-####" })
        }
        FieldKind::Number => json!({ "placeholder": "Enter number", "min": 0, "max": 100 }),
        FieldKind::Url => json!({ "placeholder": "Enter URL" }),
        FieldKind::Textarea => json!({ "placeholder": "Enter text", "rows": 4 }),
        FieldKind::Select => json!({ "placeholder": "Select an option", "options": default_options() }),
        FieldKind::Radio => json!({ "options": default_options() }),
        FieldKind::RichText => json!({ "placeholder": "Enter rich text", "defaultValue": "" }),
        FieldKind::Signature => json!({ "width": 400, "height": 200 }),
        FieldKind::Currency => json!({ "placeholder": "0.00", "currency": "USD" }),
        FieldKind::DynamicList => json!({
            "itemLabel": "Item",
            "addButtonText": "Add Item",
            "minItems": 0,
            "maxItems": 0
        }),
        FieldKind::Grid => json!({ "columns": 2, "gap": 4 }),
        FieldKind::Flex => json!({
            "direction": "row",
            "wrap": false,
            "gap": 4,
            "justify": "between",
            "align": "center"
        }),
        FieldKind::Row | FieldKind::Column => json!({ "gap": 4 }),
        FieldKind::Section => json!({
            "title": "Section Title",
            "description": "Section description goes here"
        }),
        FieldKind::Checkbox | FieldKind::Switch | FieldKind::Date => json!({}),
    };

    if let Value::Object(extra) = extra {
        props.extend(extra);
    }
    props
}

fn default_label(kind: FieldKind) -> String {
    match kind {
        FieldKind::Checkbox => "Checkbox Label".to_string(),
        FieldKind::Switch => "Switch Label".to_string(),
        _ => {
            let wire = kind.wire_name();
            let mut chars = wire.chars();
            match chars.next() {
                Some(first) => format!("{}{} Field", first.to_uppercase(), chars.as_str()),
                None => "Field".to_string(),
            }
        }
    }
}

fn default_options() -> Value {
    json!([
        { "label": "Option 1", "value": "option1" },
        { "label": "Option 2", "value": "option2" },
        { "label": "Option 3", "value": "option3" }
    ])
}
