use super::Condition;
use itertools::Itertools;

/// Formats conditions into compact, human-readable infix strings.
pub struct ConditionFormatter;

impl ConditionFormatter {
    /// Format a condition, e.g. `task(r1) executed AND edge(e1)[isYes]`.
    pub fn format(condition: &Condition) -> String {
        Self::format_recursive(condition, 0)
    }

    /// Recursively formats the condition, adding parentheses only when necessary.
    fn format_recursive(condition: &Condition, parent_precedence: u8) -> String {
        // A single-member group prints as its member.
        if let Condition::And { conditions } | Condition::Or { conditions } = condition {
            if let [only] = conditions.as_slice() {
                return Self::format_recursive(only, parent_precedence);
            }
        }

        let current_precedence = Self::precedence(condition);
        let needs_parens = current_precedence < parent_precedence;

        let body = match condition {
            Condition::Always => "always".to_string(),
            Condition::TaskState { task_id, state } => format!("task({}) {}", task_id, state),
            Condition::EdgeCondition { edge_id, condition } => {
                format!("edge({})[{}]", edge_id, condition)
            }
            Condition::RetrievalState { state } => format!("retrieval is {}", state),
            Condition::StepActivated { step_id } => format!("step({}) active", step_id),
            Condition::And { conditions } => Self::join(conditions, " AND ", current_precedence),
            Condition::Or { conditions } => Self::join(conditions, " OR ", current_precedence),
            Condition::Not { condition } => {
                format!("NOT {}", Self::format_recursive(condition, current_precedence))
            }
        };

        if needs_parens {
            format!("({})", body)
        } else {
            body
        }
    }

    fn join(conditions: &[Condition], separator: &str, precedence: u8) -> String {
        // An empty group has no infix form; the runtime treats it as its identity.
        if conditions.is_empty() {
            return if separator == " AND " { "always" } else { "never" }.to_string();
        }
        conditions
            .iter()
            .map(|c| Self::format_recursive(c, precedence + 1))
            .join(separator)
    }

    fn precedence(condition: &Condition) -> u8 {
        match condition {
            Condition::Or { .. } => 1,
            Condition::And { .. } => 2,
            Condition::Not { .. } => 3,
            _ => 4,
        }
    }
}
