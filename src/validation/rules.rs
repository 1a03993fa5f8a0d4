use crate::condition::format_number;
use crate::form::ComponentNode;
use regex::Regex;
use serde_json::Value;

pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Only an absent value or `""` fails a required check. An unchecked box is left to the
/// generated schema's refinement.
pub(super) fn is_required_empty(value: Option<&Value>) -> bool {
    match value {
        None => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

/// The value as text, when it is a non-empty string.
pub(super) fn non_empty_text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

pub(super) fn check_length(field: &ComponentNode, value: Option<&Value>) -> Option<String> {
    let text = non_empty_text(value)?;
    let length = text.encode_utf16().count() as f64;
    let label = field.label();

    if let Some(min) = field.prop_limit("minLength") {
        if length < min {
            return Some(format!(
                "{} must be at least {} characters",
                label,
                format_number(min)
            ));
        }
    }
    if let Some(max) = field.prop_limit("maxLength") {
        if length > max {
            return Some(format!(
                "{} must be at most {} characters",
                label,
                format_number(max)
            ));
        }
    }
    None
}

pub(super) fn check_range(field: &ComponentNode, value: Option<&Value>) -> Option<String> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let label = field.label();

    if let Some(min) = field.prop_f64("min") {
        if number < min {
            return Some(format!("{} must be at least {}", label, format_number(min)));
        }
    }
    if let Some(max) = field.prop_f64("max") {
        if number > max {
            return Some(format!("{} must be at most {}", label, format_number(max)));
        }
    }
    None
}

/// Between 7 and 15 digits, and nothing but digits, whitespace, parentheses, `+` and `-`.
pub(super) fn is_valid_phone(text: &str, charset: &Regex) -> bool {
    let digits = text.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) && charset.is_match(text)
}
