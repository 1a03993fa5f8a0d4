//! Common test utilities for building form forests and values.
use serde_json::{Value, json};
use yoshiki::prelude::*;

/// A single required email field named `email`, labelled "Email".
#[allow(dead_code)]
pub fn create_email_form() -> Vec<ComponentNode> {
    vec![
        ComponentNode::new("email_1", FieldKind::Email, "email")
            .with_prop("label", "Email")
            .with_prop("required", true),
    ]
}

/// A section holding a required `terms` checkbox and a `details` text field that is only shown
/// when `terms` is checked.
///
/// Logic: `details` visible iff `$terms === true`
#[allow(dead_code)]
pub fn create_terms_form() -> Vec<ComponentNode> {
    let section = ComponentNode::new("section_1", FieldKind::Section, "section1")
        .with_prop("title", "Agreement")
        .with_children(vec![
            ComponentNode::new("checkbox_1", FieldKind::Checkbox, "terms")
                .with_prop("label", "Accept terms")
                .with_prop("required", true),
            ComponentNode::new("text_1", FieldKind::Text, "details")
                .with_prop("label", "Details")
                .with_prop("required", true)
                .with_condition(Condition::new(
                    "terms",
                    Operator::Equals,
                    Some(json!(true)),
                )),
        ]);
    yoshiki::tree::relink_parents(vec![section])
}

/// A form touching every layout container and most field kinds.
#[allow(dead_code)]
pub fn create_kitchen_sink_form() -> Vec<ComponentNode> {
    let grid = ComponentNode::new("grid_1", FieldKind::Grid, "grid1")
        .with_prop("columns", 3)
        .with_children(vec![
            ComponentNode::new("text_1", FieldKind::Text, "first")
                .with_prop("label", "First name")
                .with_prop("minLength", 2),
            ComponentNode::new("number_1", FieldKind::Number, "age")
                .with_prop("label", "Age")
                .with_prop("min", 18),
        ]);
    let flex = ComponentNode::new("flex_1", FieldKind::Flex, "flex1")
        .with_prop("direction", "column")
        .with_children(vec![
            ComponentNode::new("select_1", FieldKind::Select, "plan")
                .with_prop("label", "Plan")
                .with_prop(
                    "options",
                    json!([{ "label": "Free", "value": "free" }, { "label": "Pro", "value": "pro" }]),
                ),
            ComponentNode::new("date_1", FieldKind::Date, "start").with_prop("label", "Start"),
        ]);
    let row = ComponentNode::new("row_1", FieldKind::Row, "row1").with_children(vec![
        ComponentNode::new("phone_1", FieldKind::PhoneNumber, "phone")
            .with_prop("label", "Phone")
            .with_prop("format", "(###) ###-####"),
        ComponentNode::new("currency_1", FieldKind::Currency, "budget")
            .with_prop("label", "Budget")
            .with_prop("currency", "EUR"),
    ]);
    let column = ComponentNode::new("column_1", FieldKind::Column, "column1").with_children(vec![
        ComponentNode::new("switch_1", FieldKind::Switch, "newsletter")
            .with_prop("label", "Newsletter"),
        ComponentNode::new("radio_1", FieldKind::Radio, "contact")
            .with_prop("label", "Contact by")
            .with_prop(
                "options",
                json!([{ "label": "Mail", "value": "mail" }, { "label": "Phone", "value": "phone" }]),
            )
            .with_condition(Condition::new("newsletter", Operator::Equals, Some(json!(true)))),
    ]);
    yoshiki::tree::relink_parents(vec![grid, flex, row, column])
}

/// Builds form values from `(name, value)` pairs.
#[allow(dead_code)]
pub fn values(pairs: &[(&str, Value)]) -> FormValues {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}
