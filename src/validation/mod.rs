//! Preview validation: the synchronous field-level pass run when the preview form is submitted.
//!
//! Only one message is kept per field: rules are checked in a fixed order and the first failure
//! wins. Fields hidden by conditions (their own or an ancestor container's) are exempt. Custom
//! validation source attached to a field is not executed here; it only ends up in the
//! generated schema.
use crate::condition::{self, FormValues};
use crate::form::{ComponentNode, FieldKind};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use uuid::Uuid;

mod rules;

pub use rules::{MIN_PHONE_DIGITS, MAX_PHONE_DIGITS};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s()+-]+$").expect("valid phone pattern"));

/// Field errors from one validation pass, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: BTreeMap<String, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

/// A preview submission that passed validation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub values: BTreeMap<String, Value>,
}

/// Leaf fields currently shown: the field and all its containers pass their conditions.
pub fn visible_fields<'a>(
    forest: &'a [ComponentNode],
    values: &FormValues,
) -> Vec<&'a ComponentNode> {
    let mut out = Vec::new();
    collect_visible(forest, values, &mut out);
    out
}

fn collect_visible<'a>(
    nodes: &'a [ComponentNode],
    values: &FormValues,
    out: &mut Vec<&'a ComponentNode>,
) {
    for node in nodes {
        if !condition::visible(node, values) {
            log::debug!("Skipping hidden component '{}'", node.name);
            continue;
        }
        if node.kind.is_layout() {
            collect_visible(node.children(), values, out);
        } else {
            out.push(node);
        }
    }
}

/// Validates the given fields. Callers pass only visible fields.
pub fn validate_fields(fields: &[&ComponentNode], values: &FormValues) -> ValidationReport {
    let errors = fields
        .iter()
        .filter_map(|field| {
            check_field(field, values.get(&field.name)).map(|msg| (field.name.clone(), msg))
        })
        .collect();
    ValidationReport { errors }
}

/// Validates every visible field of the forest.
pub fn validate(forest: &[ComponentNode], values: &FormValues) -> ValidationReport {
    let fields = visible_fields(forest, values);
    validate_fields(&fields, values)
}

/// Validates and, on success, stamps the values as a submission.
pub fn submit(forest: &[ComponentNode], values: &FormValues) -> Result<Submission, ValidationReport> {
    let report = validate(forest, values);
    if !report.is_valid() {
        log::info!("Submission blocked by {} field error(s)", report.errors.len());
        return Err(report);
    }

    let submission = Submission {
        submission_id: Uuid::new_v4(),
        submitted_at: Utc::now(),
        values: values.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
    };
    log::info!("Accepted submission {}", submission.submission_id);
    Ok(submission)
}

/// The first failing rule for one field, if any.
fn check_field(field: &ComponentNode, value: Option<&Value>) -> Option<String> {
    let label = field.label();

    if field.is_required() && rules::is_required_empty(value) {
        return Some(format!("{} is required", label));
    }

    match field.kind {
        FieldKind::Text | FieldKind::Password => rules::check_length(field, value),
        FieldKind::Number => rules::check_range(field, value),
        FieldKind::Email => {
            let text = rules::non_empty_text(value)?;
            (!EMAIL_PATTERN.is_match(text)).then(|| "Invalid email address".to_string())
        }
        FieldKind::PhoneNumber => {
            let text = rules::non_empty_text(value)?;
            (!rules::is_valid_phone(text, &PHONE_CHARSET))
                .then(|| "Please enter a valid phone number".to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn required_wins_over_shape() {
        let field = ComponentNode::new("e", FieldKind::Email, "email")
            .with_prop("label", "Email")
            .with_prop("required", true);
        let report = validate(&[field], &values(&[("email", json!(""))]));
        assert_eq!(report.error("email"), Some("Email is required"));
    }

    #[test]
    fn text_length_limits() {
        let field = ComponentNode::new("t", FieldKind::Text, "nick")
            .with_prop("label", "Nickname")
            .with_prop("minLength", 3)
            .with_prop("maxLength", 5);
        let forest = [field];
        assert_eq!(
            validate(&forest, &values(&[("nick", json!("ab"))])).error("nick"),
            Some("Nickname must be at least 3 characters")
        );
        assert_eq!(
            validate(&forest, &values(&[("nick", json!("abcdef"))])).error("nick"),
            Some("Nickname must be at most 5 characters")
        );
        assert!(validate(&forest, &values(&[("nick", json!("abcd"))])).is_valid());
        // Empty, non-required text is not length-checked.
        assert!(validate(&forest, &values(&[])).is_valid());
    }

    #[test]
    fn number_range_accepts_numeric_strings() {
        let field = ComponentNode::new("n", FieldKind::Number, "age")
            .with_prop("label", "Age")
            .with_prop("min", 18)
            .with_prop("max", 99);
        let forest = [field];
        assert_eq!(
            validate(&forest, &values(&[("age", json!("17"))])).error("age"),
            Some("Age must be at least 18")
        );
        assert_eq!(
            validate(&forest, &values(&[("age", json!(100))])).error("age"),
            Some("Age must be at most 99")
        );
        assert!(validate(&forest, &values(&[("age", json!(42))])).is_valid());
    }

    #[test]
    fn phone_number_digits_and_charset() {
        let field = ComponentNode::new("p", FieldKind::PhoneNumber, "phone");
        let forest = [field];
        let msg = Some("Please enter a valid phone number");
        assert_eq!(validate(&forest, &values(&[("phone", json!("12345"))])).error("phone"), msg);
        assert_eq!(
            validate(&forest, &values(&[("phone", json!("555-123-4567 ext"))])).error("phone"),
            msg
        );
        assert!(validate(&forest, &values(&[("phone", json!("(555) 123-4567"))])).is_valid());
    }

    #[test]
    fn only_missing_or_blank_values_are_empty() {
        let field = ComponentNode::new("c", FieldKind::Checkbox, "terms")
            .with_prop("label", "Accept terms")
            .with_prop("required", true);
        let forest = [field];
        assert_eq!(
            validate(&forest, &FormValues::new()).error("terms"),
            Some("Accept terms is required")
        );
        assert_eq!(
            validate(&forest, &values(&[("terms", json!(""))])).error("terms"),
            Some("Accept terms is required")
        );
        assert!(validate(&forest, &values(&[("terms", json!(false))])).is_valid());
        assert!(validate(&forest, &values(&[("terms", json!(null))])).is_valid());
    }

    #[test]
    fn length_counts_utf16_units() {
        let field = ComponentNode::new("t", FieldKind::Text, "nick")
            .with_prop("label", "Nick")
            .with_prop("maxLength", 3);
        let forest = [field];
        assert!(validate(&forest, &values(&[("nick", json!("abc"))])).is_valid());
        assert_eq!(
            validate(&forest, &values(&[("nick", json!("ab\u{1F600}"))])).error("nick"),
            Some("Nick must be at most 3 characters")
        );
    }

    #[test]
    fn submit_stamps_valid_values() {
        let field = ComponentNode::new("t", FieldKind::Text, "name");
        let submission = submit(&[field], &values(&[("name", json!("Ada"))])).unwrap();
        assert_eq!(submission.values["name"], json!("Ada"));
    }
}
