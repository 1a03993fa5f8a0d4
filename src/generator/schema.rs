use super::fragment;
use super::script::{escape_js, property_key};
use super::writer::SourceWriter;
use crate::condition::format_number;
use crate::error::FragmentError;
use crate::form::{ComponentNode, FieldKind};
use crate::validation::{MAX_PHONE_DIGITS, MIN_PHONE_DIGITS};
use serde_json::Value;

/// Emits the zod schema module for `fields`.
pub(super) fn emit_schema(
    fields: &[&ComponentNode],
    form_name: &str,
    indent_width: usize,
    warnings: &mut Vec<FragmentError>,
) -> String {
    let mut validators: Vec<(String, &str)> = Vec::new();
    let mut entries: Vec<(&ComponentNode, String)> = Vec::new();

    for &field in fields {
        let mut expr = field_rules(field);

        match fragment::custom_validation(field) {
            Ok(Some(source)) => {
                let name = format!("customValidation{}", validators.len() + 1);
                expr.push_str(&custom_refine(&name));
                validators.push((name, source));
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("Skipping custom validation: {}", e);
                warnings.push(e);
            }
        }
        entries.push((field, expr));
    }

    let mut w = SourceWriter::new(indent_width);
    w.line(0, "import { z } from \"zod\"");
    w.blank();

    // User functions are written exactly as authored, outside the re-indented schema body.
    for (name, source) in &validators {
        w.verbatim(&format!("const {} = {}", name, source));
        w.blank();
    }

    w.line(0, format!("export const {}Schema = z.object({{", form_name));
    for (field, expr) in &entries {
        w.block(1, &format!("{}: {},", property_key(&field.name), expr));
    }

    w.line(0, "})");
    w.blank();
    w.line(
        0,
        format!(
            "export type {name}Type = z.infer<typeof {name}Schema>",
            name = form_name
        ),
    );
    w.finish()
}

/// The zod expression for one field, before custom validation.
fn field_rules(field: &ComponentNode) -> String {
    let label = escape_js(field.label());
    let required = field.is_required();
    let required_rule = if required {
        format!(".min(1, {{ message: \"{} is required\" }})", label)
    } else {
        String::new()
    };

    match field.kind {
        FieldKind::Text => format!(
            "z.string(){}{}{}",
            required_rule,
            min_length_rule(field, &label),
            max_length_rule(field, &label)
        ),
        FieldKind::Email => format!(
            "z.string(){}.email({{ message: \"Invalid email address\" }})",
            required_rule
        ),
        FieldKind::Password => format!(
            "z.string(){}{}",
            required_rule,
            min_length_rule(field, &label)
        ),
        FieldKind::PhoneNumber => format!(
            "z.string(){}.refine((val) => {{\n  if (!val) return {};\n  const digits = val.replace(/\\D/g, \"\");\n  if (digits.length < {} || digits.length > {}) return false;\n  return /^[\\d\\s()+\\-]+$/.test(val);\n}}, {{ message: \"Please enter a valid phone number\" }})",
            required_rule, !required, MIN_PHONE_DIGITS, MAX_PHONE_DIGITS
        ),
        FieldKind::Url => format!(
            "z.string(){}.refine((val) => {{\n  if (!val) return {};\n  try {{\n    new URL(val);\n    return true;\n  }} catch {{\n    return false;\n  }}\n}}, {{ message: \"Invalid URL format\" }})",
            required_rule, !required
        ),
        FieldKind::Currency => {
            let mut expr = format!(
                "z.string(){}.refine((val) => !val || /^-?\\d*\\.?\\d*$/.test(val), {{ message: \"Invalid currency format\" }})",
                required_rule
            );
            if let Some(min) = field.prop_f64("min") {
                let min = format_number(min);
                expr.push_str(&format!(
                    ".refine(\n  (val) => {{\n    if (!val) return {};\n    const num = parseFloat(val);\n    return isNaN(num) || num >= {};\n  }},\n  {{ message: \"{} must be at least {}\" }}\n)",
                    !required, min, label, min
                ));
            }
            expr
        }
        FieldKind::Number => {
            let mut expr = if required {
                format!("z.number({{ required_error: \"{} is required\" }})", label)
            } else {
                "z.number().optional()".to_string()
            };
            if let Some(min) = field.prop_f64("min") {
                let min = format_number(min);
                expr.push_str(&format!(
                    ".min({}, {{ message: \"{} must be at least {}\" }})",
                    min, label, min
                ));
            }
            if let Some(max) = field.prop_f64("max") {
                let max = format_number(max);
                expr.push_str(&format!(
                    ".max({}, {{ message: \"{} must be at most {}\" }})",
                    max, label, max
                ));
            }
            expr
        }
        FieldKind::Checkbox | FieldKind::Switch => {
            if required {
                format!(
                    "z.boolean().refine((val) => val === true, {{ message: \"{} is required\" }})",
                    label
                )
            } else {
                "z.boolean().default(false)".to_string()
            }
        }
        FieldKind::Date => {
            if required {
                format!("z.date({{ required_error: \"{} is required\" }})", label)
            } else {
                "z.date().optional()".to_string()
            }
        }
        FieldKind::DynamicList => dynamic_list_rules(field),
        FieldKind::Tel
        | FieldKind::Textarea
        | FieldKind::RichText
        | FieldKind::Signature
        | FieldKind::Select
        | FieldKind::Radio => format!("z.string(){}", required_rule),
        // Layout kinds never reach the schema; treat them as plain strings if they do.
        FieldKind::Grid | FieldKind::Flex | FieldKind::Row | FieldKind::Column | FieldKind::Section => {
            "z.string()".to_string()
        }
    }
}

fn min_length_rule(field: &ComponentNode, label: &str) -> String {
    field
        .prop_limit("minLength")
        .map(|n| {
            let n = format_number(n);
            format!(
                ".min({}, {{ message: \"{} must be at least {} characters\" }})",
                n, label, n
            )
        })
        .unwrap_or_default()
}

fn max_length_rule(field: &ComponentNode, label: &str) -> String {
    field
        .prop_limit("maxLength")
        .map(|n| {
            let n = format_number(n);
            format!(
                ".max({}, {{ message: \"{} must be at most {} characters\" }})",
                n, label, n
            )
        })
        .unwrap_or_default()
}

/// `z.array(z.object({...}))` built from the list's `fields` property, with item-count limits.
fn dynamic_list_rules(field: &ComponentNode) -> String {
    let item_fields: Vec<&Value> = field
        .prop("fields")
        .and_then(Value::as_array)
        .map(|items| items.iter().collect())
        .unwrap_or_default();

    let mut entries = Vec::new();
    for item in item_fields {
        let Some(name) = item.get("name").and_then(Value::as_str) else {
            continue;
        };
        let label = escape_js(item.get("label").and_then(Value::as_str).unwrap_or(name));
        let required = matches!(item.get("required"), Some(Value::Bool(true)));
        let rule = match item.get("type").and_then(Value::as_str) {
            Some("number") if required => {
                format!("z.number({{ required_error: \"{} is required\" }})", label)
            }
            Some("number") => "z.number().optional()".to_string(),
            _ if required => format!("z.string().min(1, {{ message: \"{} is required\" }})", label),
            _ => "z.string()".to_string(),
        };
        entries.push(format!("  {}: {}", property_key(name), rule));
    }

    let mut expr = if entries.is_empty() {
        "z.array(z.object({}))".to_string()
    } else {
        format!("z.array(z.object({{\n{}\n}}))", entries.join(",\n"))
    };

    let item_label = field.prop_str("itemLabel").unwrap_or("item");
    if let Some(min) = field.prop_limit("minItems") {
        expr.push_str(&format!(
            ".min({}, {{ message: \"At least {} {}{} required\" }})",
            format_number(min),
            format_number(min),
            escape_js(item_label),
            plural(min)
        ));
    }
    if let Some(max) = field.prop_limit("maxItems") {
        expr.push_str(&format!(
            ".max({}, {{ message: \"Maximum {} {}{} allowed\" }})",
            format_number(max),
            format_number(max),
            escape_js(item_label),
            plural(max)
        ));
    }
    expr.push_str(".default([])");
    expr
}

fn plural(count: f64) -> &'static str {
    if count > 1.0 { "s" } else { "" }
}

/// Refinement calling the user's validation function bound to `name`. The function's return
/// value is the error message unless it is exactly `true`.
fn custom_refine(name: &str) -> String {
    format!(
        ".refine(\n  (value) => {name}(value) === true,\n  (value) => ({{ message: String({name}(value)) }})\n)",
        name = name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(fields: &[&ComponentNode]) -> (String, Vec<FragmentError>) {
        let mut warnings = Vec::new();
        let schema = emit_schema(fields, "Signup", 2, &mut warnings);
        (schema, warnings)
    }

    #[test]
    fn emits_object_with_type_alias() {
        let email = ComponentNode::new("e", FieldKind::Email, "email")
            .with_prop("label", "Email")
            .with_prop("required", true);
        let (schema, warnings) = emit(&[&email]);
        assert!(warnings.is_empty());
        assert!(schema.starts_with("import { z } from \"zod\"\n\nexport const SignupSchema = z.object({\n"));
        assert!(schema.contains(
            "  email: z.string().min(1, { message: \"Email is required\" }).email({ message: \"Invalid email address\" }),\n"
        ));
        assert!(schema.ends_with("export type SignupType = z.infer<typeof SignupSchema>\n"));
    }

    #[test]
    fn multi_line_refines_are_indented_under_the_key() {
        let phone = ComponentNode::new("p", FieldKind::PhoneNumber, "phone");
        let (schema, _) = emit(&[&phone]);
        assert!(schema.contains("  phone: z.string().refine((val) => {\n    if (!val) return true;\n"));
        assert!(schema.contains("  }, { message: \"Please enter a valid phone number\" }),\n"));
    }

    #[test]
    fn number_range_and_optional() {
        let age = ComponentNode::new("n", FieldKind::Number, "age")
            .with_prop("label", "Age")
            .with_prop("min", 18)
            .with_prop("max", 99.5);
        let (schema, _) = emit(&[&age]);
        assert!(schema.contains(
            "age: z.number().optional().min(18, { message: \"Age must be at least 18\" }).max(99.5, { message: \"Age must be at most 99.5\" }),"
        ));
    }

    #[test]
    fn dynamic_list_items_and_limits() {
        let list = ComponentNode::new("d", FieldKind::DynamicList, "contacts")
            .with_prop("itemLabel", "contact")
            .with_prop("minItems", 2)
            .with_prop(
                "fields",
                serde_json::json!([
                    { "name": "who", "label": "Who", "type": "text", "required": true },
                    { "name": "age", "label": "Age", "type": "number", "required": false }
                ]),
            );
        let (schema, _) = emit(&[&list]);
        assert!(schema.contains("  contacts: z.array(z.object({\n    who: z.string().min(1, { message: \"Who is required\" }),\n    age: z.number().optional()\n  })).min(2, { message: \"At least 2 contacts required\" }).default([]),\n"));
    }

    #[test]
    fn unbalanced_custom_validation_is_dropped() {
        let field = ComponentNode::new("t", FieldKind::Text, "code")
            .with_prop("customValidation", "(v) => (v.length > 2");
        let (schema, warnings) = emit(&[&field]);
        assert_eq!(warnings.len(), 1);
        assert!(!schema.contains(".refine("));
        assert!(schema.contains("  code: z.string(),\n"));
    }

    #[test]
    fn custom_validation_is_embedded_verbatim() {
        let field = ComponentNode::new("t", FieldKind::Text, "code")
            .with_prop("customValidation", "(v) => v.length > 2 || \"Too short\"");
        let (schema, _) = emit(&[&field]);
        assert!(schema.contains("const customValidation1 = (v) => v.length > 2 || \"Too short\"\n"));
        assert!(schema.contains("    (value) => customValidation1(value) === true,\n"));
    }

    #[test]
    fn multi_line_validation_keeps_its_indentation() {
        let source = "(v) => {\n   const msg = `a\n     b`;\n     return v.length > 1 || msg;\n}";
        let field = ComponentNode::new("t", FieldKind::Text, "code").with_prop("customValidation", source);
        let mut warnings = Vec::new();
        let schema = emit_schema(&[&field], "Signup", 4, &mut warnings);
        assert!(warnings.is_empty());
        assert!(schema.contains(source));
        assert!(schema.contains("\n     b`;\n"));
    }
}
