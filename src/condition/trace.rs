use crate::form::Operator;
use serde_json::Value;

/// How a single condition was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOutcome {
    Passed,
    Failed,
    /// Skipped because an earlier condition already hid the node.
    NotEvaluated,
}

/// A record of one condition: what it compared, what it read and how it ended.
#[derive(Debug, Clone)]
pub struct ConditionTrace {
    pub field: String,
    pub operator: Operator,
    pub expected: Option<Value>,
    pub actual: Option<Value>,
    pub outcome: ConditionOutcome,
}

/// The visibility decision for a node together with its per-condition records.
#[derive(Debug, Clone)]
pub struct VisibilityTrace {
    pub node_id: String,
    pub visible: bool,
    pub conditions: Vec<ConditionTrace>,
}

impl VisibilityTrace {
    /// The condition that hid the node, if any.
    pub fn failing_condition(&self) -> Option<&ConditionTrace> {
        self.conditions
            .iter()
            .find(|c| c.outcome == ConditionOutcome::Failed)
    }
}
