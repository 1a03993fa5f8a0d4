//! JavaScript text helpers shared by the schema and component emitters.
use crate::condition::{format_number, js_string};
use crate::form::{ComponentNode, Condition, Operator};
use serde_json::Value;

/// Escapes text for use inside a double-quoted JavaScript string literal.
pub fn escape_js(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

/// A JavaScript literal for a JSON value; a missing value is `undefined`.
pub fn js_literal(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Number(n)) => n.as_f64().map(format_number).unwrap_or_default(),
        Some(Value::String(s)) => format!("\"{}\"", escape_js(s)),
        Some(other) => other.to_string(),
    }
}

/// The property rendered as text, or `default` when it is missing or falsy.
pub fn prop_or(node: &ComponentNode, key: &str, default: &str) -> String {
    match node.prop(key) {
        None | Some(Value::Bool(false)) => default.to_string(),
        Some(Value::String(s)) if s.is_empty() => default.to_string(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => default.to_string(),
        Some(value) => js_string(Some(value)),
    }
}

/// Turns a component name into an identifier usable in generated code.
///
/// Characters outside `[A-Za-z0-9_$]` are dropped and a leading digit gets an underscore.
pub fn identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// An object key for a field name. Names that are not plain identifiers are quoted so the key
/// stays the same string the form reads and watches.
pub fn property_key(name: &str) -> String {
    if !name.is_empty() && identifier(name) == name {
        name.to_string()
    } else {
        format!("\"{}\"", escape_js(name))
    }
}

/// The JavaScript expression equivalent to evaluating `conditions` at render time.
///
/// Mirrors the condition evaluator: every condition must hold, unknown operators are `true`.
pub fn condition_expression(conditions: &[Condition]) -> String {
    if conditions.is_empty() {
        return "true".to_string();
    }

    let checks: Vec<String> = conditions.iter().map(condition_check).collect();
    if checks.len() == 1 {
        return checks.into_iter().next().unwrap_or_default();
    }
    checks
        .into_iter()
        .map(|check| format!("({})", check))
        .collect::<Vec<_>>()
        .join(" && ")
}

fn condition_check(condition: &Condition) -> String {
    let field = format!("form.watch(\"{}\")", escape_js(&condition.field));
    let value = js_literal(condition.value.as_ref());

    match &condition.operator {
        Operator::Equals => format!("{} === {}", field, value),
        Operator::NotEquals => format!("{} !== {}", field, value),
        Operator::Contains => format!(
            "Array.isArray({f}) ? {f}.includes({v}) : String({f}).includes(String({v}))",
            f = field,
            v = value
        ),
        Operator::NotContains => format!(
            "Array.isArray({f}) ? !{f}.includes({v}) : !String({f}).includes(String({v}))",
            f = field,
            v = value
        ),
        Operator::IsEmpty => format!(
            "{f} === undefined || {f} === null || {f} === \"\" || (Array.isArray({f}) && {f}.length === 0)",
            f = field
        ),
        Operator::IsNotEmpty => format!(
            "{f} !== undefined && {f} !== null && {f} !== \"\" && (!Array.isArray({f}) || {f}.length > 0)",
            f = field
        ),
        Operator::Unknown(name) => {
            log::debug!("Unknown operator '{}' rendered as always visible", name);
            "true".to_string()
        }
    }
}
