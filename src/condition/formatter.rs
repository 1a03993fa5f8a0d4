use super::trace::{ConditionOutcome, ConditionTrace, VisibilityTrace};
use super::js_string;
use serde_json::Value;

/// Formats visibility traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Explains a visibility decision, e.g. `hidden: $terms (was false) equals true`.
    pub fn format_trace(trace: &VisibilityTrace) -> String {
        if trace.conditions.is_empty() {
            return "visible: no conditions".to_string();
        }

        // Only the evaluated conditions took part in the decision.
        let evaluated = trace
            .conditions
            .iter()
            .filter(|c| c.outcome != ConditionOutcome::NotEvaluated);

        let body = if trace.visible {
            evaluated
                .map(Self::format_condition)
                .collect::<Vec<_>>()
                .join(" AND ")
        } else {
            trace
                .failing_condition()
                .map(Self::format_condition)
                .unwrap_or_default()
        };

        let state = if trace.visible { "visible" } else { "hidden" };
        format!("{}: {}", state, body)
    }

    /// Formats one condition with the value it read.
    pub fn format_condition(condition: &ConditionTrace) -> String {
        let lhs = format!(
            "${} (was {})",
            condition.field,
            Self::format_value(condition.actual.as_ref())
        );
        if condition.operator.takes_value() {
            format!(
                "{} {} {}",
                lhs,
                condition.operator,
                Self::format_value(condition.expected.as_ref())
            )
        } else {
            format!("{} {}", lhs, condition.operator)
        }
    }

    /// Format a value for display. Strings are quoted so that `""` stays visible.
    fn format_value(value: Option<&Value>) -> String {
        match value {
            Some(Value::String(s)) => format!("{:?}", s),
            other => js_string(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Operator;
    use serde_json::json;

    #[test]
    fn formats_hidden_trace_with_failing_condition() {
        let trace = VisibilityTrace {
            node_id: "details".to_string(),
            visible: false,
            conditions: vec![ConditionTrace {
                field: "terms".to_string(),
                operator: Operator::Equals,
                expected: Some(json!(true)),
                actual: Some(json!(false)),
                outcome: ConditionOutcome::Failed,
            }],
        };
        assert_eq!(
            TraceFormatter::format_trace(&trace),
            "hidden: $terms (was false) equals true"
        );
    }

    #[test]
    fn omits_operand_for_emptiness_checks() {
        let condition = ConditionTrace {
            field: "note".to_string(),
            operator: Operator::IsEmpty,
            expected: None,
            actual: Some(json!("")),
            outcome: ConditionOutcome::Passed,
        };
        assert_eq!(
            TraceFormatter::format_condition(&condition),
            "$note (was \"\") isEmpty"
        );
    }
}
