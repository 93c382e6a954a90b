//! Post-load normalization rules for stored payloads.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_ACTION;

/// Remove the nested fields of one top-level parameter of one payload.
///
/// The default rule targets the `inputs` field of the manual-dispatch
/// trigger, whose members are defined per workflow by the user and so cannot
/// come from the webhook tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StripChildrenRule {
    pub event: String,
    pub action: String,
    pub field: String,
}

impl StripChildrenRule {
    #[must_use]
    pub fn new(
        event: impl Into<String>,
        action: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            event: event.into(),
            action: action.into(),
            field: field.into(),
        }
    }

    /// `workflow_dispatch` / `default` / `inputs`.
    #[must_use]
    pub fn workflow_dispatch_inputs() -> Self {
        Self::new("workflow_dispatch", DEFAULT_ACTION, "inputs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_dispatch_rule_targets_inputs() {
        let rule = StripChildrenRule::workflow_dispatch_inputs();
        assert_eq!(rule.event, "workflow_dispatch");
        assert_eq!(rule.action, "default");
        assert_eq!(rule.field, "inputs");
    }
}
