//! Visibility conditions: decides whether a node is shown given the current form values.
use crate::form::{ComponentNode, Condition, Operator};
use ahash::AHashMap;
use serde_json::Value;

mod formatter;
mod trace;

pub use formatter::TraceFormatter;
pub use trace::{ConditionOutcome, ConditionTrace, VisibilityTrace};

/// Current form values keyed by field name. A missing key reads as `undefined`.
pub type FormValues = AHashMap<String, Value>;

/// Whether `node` is visible for `values`.
///
/// A node without conditions is always visible; otherwise every condition must hold.
pub fn visible(node: &ComponentNode, values: &FormValues) -> bool {
    node.conditions.iter().all(|c| holds(c, values))
}

/// Evaluates one condition against the value of the field it references.
pub fn holds(condition: &Condition, values: &FormValues) -> bool {
    let actual = values.get(&condition.field);
    let expected = condition.value.as_ref();

    match &condition.operator {
        Operator::Equals => strict_equals(actual, expected),
        Operator::NotEquals => !strict_equals(actual, expected),
        Operator::Contains => contains(actual, expected),
        Operator::NotContains => !contains(actual, expected),
        Operator::IsEmpty => is_empty(actual),
        Operator::IsNotEmpty => !is_empty(actual),
        // Unknown operators fail open so that future operators never hide a field.
        Operator::Unknown(_) => true,
    }
}

/// Like [`visible`], but records how each condition was decided.
///
/// Conditions after the first failing one are recorded as not evaluated.
pub fn explain(node: &ComponentNode, values: &FormValues) -> VisibilityTrace {
    let mut short_circuited = false;
    let conditions = node
        .conditions
        .iter()
        .map(|condition| {
            let outcome = if short_circuited {
                ConditionOutcome::NotEvaluated
            } else if holds(condition, values) {
                ConditionOutcome::Passed
            } else {
                short_circuited = true;
                ConditionOutcome::Failed
            };
            ConditionTrace {
                field: condition.field.clone(),
                operator: condition.operator.clone(),
                expected: condition.value.clone(),
                actual: values.get(&condition.field).cloned(),
                outcome,
            }
        })
        .collect();

    VisibilityTrace {
        node_id: node.id.clone(),
        visible: !short_circuited,
        conditions,
    }
}

/// Strict equality over JSON primitives. `null` differs from a missing value, and arrays or
/// objects are never strictly equal to anything.
pub fn strict_equals(actual: Option<&Value>, expected: Option<&Value>) -> bool {
    match (actual, expected) {
        (None, None) => true,
        (Some(Value::Null), Some(Value::Null)) => true,
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a == b,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        (Some(Value::String(a)), Some(Value::String(b))) => a == b,
        _ => false,
    }
}

/// Array membership for arrays, substring containment on the text rendering otherwise.
pub fn contains(actual: Option<&Value>, expected: Option<&Value>) -> bool {
    match actual {
        Some(Value::Array(items)) => items.iter().any(|item| strict_equals(Some(item), expected)),
        _ => js_string(actual).contains(&js_string(expected)),
    }
}

/// Absent, `null`, `""` and `[]` are empty.
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}

/// Renders a value the way a browser coerces it to a string.
pub fn js_string(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.as_f64().map(format_number).unwrap_or_default(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// Integral numbers print without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldKind;
    use serde_json::json;

    fn node_with(condition: Condition) -> ComponentNode {
        ComponentNode::new("n", FieldKind::Text, "n").with_condition(condition)
    }

    fn values(pairs: &[(&str, Value)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn equals_is_strict() {
        let node = node_with(Condition::new("age", Operator::Equals, Some(json!(18))));
        assert!(visible(&node, &values(&[("age", json!(18.0))])));
        assert!(!visible(&node, &values(&[("age", json!("18"))])));
        assert!(!visible(&node, &values(&[])));
    }

    #[test]
    fn contains_uses_membership_for_arrays() {
        let node = node_with(Condition::new("tags", Operator::Contains, Some(json!("a"))));
        assert!(visible(&node, &values(&[("tags", json!(["a", "b"]))])));
        assert!(!visible(&node, &values(&[("tags", json!(["ab"]))])));
        assert!(visible(&node, &values(&[("tags", json!("cat"))])));
    }

    #[test]
    fn contains_coerces_non_strings() {
        let node = node_with(Condition::new("n", Operator::Contains, Some(json!(2))));
        assert!(visible(&node, &values(&[("n", json!(123))])));
        // An absent value renders as "undefined".
        let node = node_with(Condition::new("x", Operator::Contains, Some(json!("def"))));
        assert!(visible(&node, &values(&[])));
    }

    #[test]
    fn not_contains_negates() {
        let node = node_with(Condition::new("s", Operator::NotContains, Some(json!("x"))));
        assert!(visible(&node, &values(&[("s", json!("abc"))])));
        assert!(!visible(&node, &values(&[("s", json!("xyz"))])));
    }

    #[test]
    fn unknown_operator_fails_open() {
        let node = node_with(Condition::new(
            "s",
            Operator::from("greaterThan".to_string()),
            Some(json!(1)),
        ));
        assert!(visible(&node, &values(&[])));
    }

    #[test]
    fn explain_short_circuits() {
        let node = ComponentNode::new("n", FieldKind::Text, "n")
            .with_condition(Condition::new("a", Operator::IsNotEmpty, None))
            .with_condition(Condition::new("b", Operator::Equals, Some(json!(1))));
        let trace = explain(&node, &values(&[("b", json!(1))]));
        assert!(!trace.visible);
        assert_eq!(trace.conditions[0].outcome, ConditionOutcome::Failed);
        assert_eq!(trace.conditions[1].outcome, ConditionOutcome::NotEvaluated);
    }

    #[test]
    fn js_string_matches_browser_coercion() {
        assert_eq!(js_string(Some(&json!(1.5))), "1.5");
        assert_eq!(js_string(Some(&json!(3.0))), "3");
        assert_eq!(js_string(Some(&json!([1, null, "x"]))), "1,,x");
        assert_eq!(js_string(Some(&json!({"a": 1}))), "[object Object]");
    }
}
