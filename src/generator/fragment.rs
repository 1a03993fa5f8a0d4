//! Checks for user-authored fragments embedded into generated code.
//!
//! Fragments are never executed. Custom validation source is embedded verbatim once it passes a
//! structural check; custom props are parsed as a JSON object and rendered as JSX attributes.
use crate::error::FragmentError;
use crate::form::ComponentNode;
use serde_json::Value;

/// The trimmed custom validation source of `field`, if any.
pub fn custom_validation(field: &ComponentNode) -> Result<Option<&str>, FragmentError> {
    let Some(source) = field.prop_str("customValidation").map(str::trim) else {
        return Ok(None);
    };
    if source.is_empty() {
        return Ok(None);
    }
    check_balanced(source).map_err(|message| FragmentError::UnbalancedValidation {
        field: field.name.clone(),
        message,
    })?;
    Ok(Some(source))
}

/// The custom props of `field` rendered as JSX attributes, or an empty string.
pub fn custom_props(field: &ComponentNode) -> Result<String, FragmentError> {
    let Some(source) = field.prop_str("customProps").map(str::trim) else {
        return Ok(String::new());
    };
    if source.is_empty() {
        return Ok(String::new());
    }

    let parsed: Value =
        serde_json::from_str(source).map_err(|e| FragmentError::InvalidCustomProps {
            field: field.name.clone(),
            message: e.to_string(),
        })?;
    let Value::Object(entries) = parsed else {
        return Err(FragmentError::CustomPropsNotObject {
            field: field.name.clone(),
        });
    };

    Ok(entries
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{}={}", key, Value::String(s.clone())),
            other => format!("{}={{{}}}", key, other),
        })
        .collect::<Vec<_>>()
        .join(" "))
}

/// Verifies that brackets nest and string literals and block comments are closed.
fn check_balanced(source: &str) -> Result<(), String> {
    let mut stack: Vec<char> = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' | '`' => {
                let quote = c;
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    if inner == '\\' {
                        chars.next();
                    } else if inner == quote {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(format!("unterminated string literal starting with {}", quote));
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                let mut closed = false;
                for inner in chars.by_ref() {
                    if prev == '*' && inner == '/' {
                        closed = true;
                        break;
                    }
                    prev = inner;
                }
                if !closed {
                    return Err("unterminated block comment".to_string());
                }
            }
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match stack.pop() {
                    Some(open) if open == expected => {}
                    Some(open) => return Err(format!("'{}' closed by '{}'", open, c)),
                    None => return Err(format!("unexpected '{}'", c)),
                }
            }
            _ => {}
        }
    }

    match stack.last() {
        Some(open) => Err(format!("'{}' is never closed", open)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldKind;

    fn field_with(key: &str, source: &str) -> ComponentNode {
        ComponentNode::new("t", FieldKind::Text, "username").with_prop(key, source)
    }

    #[test]
    fn accepts_balanced_validation() {
        let field = field_with(
            "customValidation",
            "(value) => value.startsWith(\"a\") || \"Must start with 'a' ) \"",
        );
        assert!(custom_validation(&field).unwrap().is_some());
    }

    #[test]
    fn rejects_unbalanced_validation() {
        let field = field_with("customValidation", "(value) => { return value.length > 3");
        let err = custom_validation(&field).unwrap_err();
        assert!(matches!(err, FragmentError::UnbalancedValidation { .. }));
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn blank_fragments_are_absent() {
        assert_eq!(custom_validation(&field_with("customValidation", "   ")), Ok(None));
        assert_eq!(custom_props(&field_with("customProps", "")), Ok(String::new()));
    }

    #[test]
    fn custom_props_render_as_attributes() {
        let field = field_with("customProps", r#"{"autoComplete": "off", "maxLength": 5}"#);
        assert_eq!(custom_props(&field).unwrap(), r#"autoComplete="off" maxLength={5}"#);
    }

    #[test]
    fn custom_props_must_be_an_object() {
        let field = field_with("customProps", "[1, 2]");
        assert!(matches!(
            custom_props(&field),
            Err(FragmentError::CustomPropsNotObject { .. })
        ));
        let field = field_with("customProps", "{oops");
        assert!(matches!(
            custom_props(&field),
            Err(FragmentError::InvalidCustomProps { .. })
        ));
    }
}
