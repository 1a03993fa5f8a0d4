//! Tests for visibility condition evaluation and its traces.
mod common;
use common::*;
use serde_json::json;
use yoshiki::condition::{ConditionOutcome, holds};
use yoshiki::prelude::*;

fn field_with(conditions: Vec<Condition>) -> ComponentNode {
    conditions
        .into_iter()
        .fold(ComponentNode::new("t", FieldKind::Text, "target"), |node, c| {
            node.with_condition(c)
        })
}

#[test]
fn test_no_conditions_is_always_visible() {
    let node = field_with(vec![]);
    assert!(visible(&node, &FormValues::new()));
    assert!(visible(&node, &values(&[("anything", json!(1))])));
}

#[test]
fn test_equals_is_strict() {
    let condition = Condition::new("age", Operator::Equals, Some(json!(18)));
    assert!(holds(&condition, &values(&[("age", json!(18))])));
    assert!(holds(&condition, &values(&[("age", json!(18.0))])));
    assert!(!holds(&condition, &values(&[("age", json!("18"))])));
    assert!(!holds(&condition, &FormValues::new()));

    let not_equals = Condition::new("age", Operator::NotEquals, Some(json!(18)));
    assert!(holds(&not_equals, &values(&[("age", json!("18"))])));
}

#[test]
fn test_contains_on_strings_and_arrays() {
    let condition = Condition::new("tags", Operator::Contains, Some(json!("rust")));
    assert!(holds(&condition, &values(&[("tags", json!(["go", "rust"]))])));
    assert!(!holds(&condition, &values(&[("tags", json!(["go"]))])));
    assert!(holds(&condition, &values(&[("tags", json!("trusty"))])));

    let not_contains = Condition::new("tags", Operator::NotContains, Some(json!("rust")));
    assert!(holds(&not_contains, &values(&[("tags", json!("python"))])));
}

#[test]
fn test_is_empty_cases() {
    let condition = Condition::new("note", Operator::IsEmpty, None);
    assert!(holds(&condition, &FormValues::new()));
    assert!(holds(&condition, &values(&[("note", json!(null))])));
    assert!(holds(&condition, &values(&[("note", json!(""))])));
    assert!(holds(&condition, &values(&[("note", json!([]))])));

    assert!(!holds(&condition, &values(&[("note", json!("x"))])));
    assert!(!holds(&condition, &values(&[("note", json!(0))])));
    assert!(!holds(&condition, &values(&[("note", json!(false))])));

    let not_empty = Condition::new("note", Operator::IsNotEmpty, None);
    assert!(holds(&not_empty, &values(&[("note", json!([1]))])));
}

#[test]
fn test_all_conditions_must_hold() {
    let node = field_with(vec![
        Condition::new("a", Operator::Equals, Some(json!(true))),
        Condition::new("b", Operator::IsNotEmpty, None),
    ]);
    assert!(visible(&node, &values(&[("a", json!(true)), ("b", json!("x"))])));
    assert!(!visible(&node, &values(&[("a", json!(true))])));
    assert!(!visible(&node, &values(&[("b", json!("x"))])));
}

#[test]
fn test_unknown_operator_fails_open() {
    let condition: Condition = serde_json::from_value(json!({
        "field": "a",
        "operator": "greaterThan",
        "value": 3
    }))
    .unwrap();
    assert_eq!(condition.operator, Operator::Unknown("greaterThan".to_string()));
    assert!(visible(&field_with(vec![condition]), &FormValues::new()));
}

#[test]
fn test_explain_records_short_circuit() {
    let node = field_with(vec![
        Condition::new("a", Operator::Equals, Some(json!(1))),
        Condition::new("b", Operator::Equals, Some(json!(2))),
    ]);
    let trace = explain(&node, &values(&[("a", json!(5))]));

    assert!(!trace.visible);
    let outcomes: Vec<_> = trace.conditions.iter().map(|c| c.outcome).collect();
    assert_eq!(
        outcomes,
        vec![ConditionOutcome::Failed, ConditionOutcome::NotEvaluated]
    );
    assert_eq!(
        TraceFormatter::format_trace(&trace),
        "hidden: $a (was 5) equals 1"
    );
}

#[test]
fn test_terms_toggle_shows_details() {
    let forest = create_terms_form();
    let details = &forest[0].children()[1];

    assert!(!visible(details, &values(&[("terms", json!(false))])));
    assert!(visible(details, &values(&[("terms", json!(true))])));
}
