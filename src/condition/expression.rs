use super::{ExecutionState, RetrievalState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A serializable boolean readiness guard attached to every compiled task.
///
/// The runtime evaluates these against live state; the compiler only builds them.
/// Serialized as an internally tagged union on `type`, each variant carrying
/// only its own fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Condition {
    /// Unconditionally ready.
    Always,

    /// Ready once the referenced task reaches `state`.
    TaskState {
        #[serde(rename = "taskId")]
        task_id: String,
        state: ExecutionState,
    },

    /// Ready when the runtime evaluates the predicate referenced by an edge.
    EdgeCondition {
        #[serde(rename = "edgeId")]
        edge_id: String,
        condition: String,
    },

    /// Ready while the owning dialogue is in a given retrieval state.
    RetrievalState { state: RetrievalState },

    /// Ready once the runtime has activated the given dialogue step.
    StepActivated {
        #[serde(rename = "stepId")]
        step_id: String,
    },

    And { conditions: Vec<Condition> },
    Or { conditions: Vec<Condition> },
    Not { condition: Box<Condition> },
}

impl Condition {
    pub fn task_executed(task_id: impl Into<String>) -> Self {
        Condition::TaskState {
            task_id: task_id.into(),
            state: ExecutionState::Executed,
        }
    }

    pub fn edge(edge_id: impl Into<String>, condition: impl Into<String>) -> Self {
        Condition::EdgeCondition {
            edge_id: edge_id.into(),
            condition: condition.into(),
        }
    }

    pub fn step_activated(step_id: impl Into<String>) -> Self {
        Condition::StepActivated {
            step_id: step_id.into(),
        }
    }

    pub fn and(conditions: Vec<Condition>) -> Self {
        Condition::And { conditions }
    }

    pub fn or(conditions: Vec<Condition>) -> Self {
        Condition::Or { conditions }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(condition: Condition) -> Self {
        Condition::Not {
            condition: Box::new(condition),
        }
    }

    pub fn is_always(&self) -> bool {
        matches!(self, Condition::Always)
    }

    /// Collects the ids of every task this condition waits on.
    pub fn task_dependencies(&self, tasks: &mut BTreeSet<String>) {
        match self {
            Condition::TaskState { task_id, .. } => {
                tasks.insert(task_id.clone());
            }
            Condition::And { conditions } | Condition::Or { conditions } => {
                for c in conditions {
                    c.task_dependencies(tasks);
                }
            }
            Condition::Not { condition } => condition.task_dependencies(tasks),
            Condition::Always
            | Condition::EdgeCondition { .. }
            | Condition::RetrievalState { .. }
            | Condition::StepActivated { .. } => {}
        }
    }

    /// Collects the ids of every edge whose predicate this condition consults.
    pub fn edge_dependencies(&self, edges: &mut BTreeSet<String>) {
        match self {
            Condition::EdgeCondition { edge_id, .. } => {
                edges.insert(edge_id.clone());
            }
            Condition::And { conditions } | Condition::Or { conditions } => {
                for c in conditions {
                    c.edge_dependencies(edges);
                }
            }
            Condition::Not { condition } => condition.edge_dependencies(edges),
            Condition::Always
            | Condition::TaskState { .. }
            | Condition::RetrievalState { .. }
            | Condition::StepActivated { .. } => {}
        }
    }
}

/// Renders a condition as an indented tree, one node per line.
pub struct DisplayCondition<'a> {
    pub condition: &'a Condition,
}

impl fmt::Display for DisplayCondition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_as_tree(self.condition, f, "", true)
    }
}

impl DisplayCondition<'_> {
    fn fmt_as_tree(
        condition: &Condition,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node_marker = if is_last { "└── " } else { "├── " };
        write!(f, "{}{}", prefix, node_marker)?;

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });

        match condition {
            Condition::Always => writeln!(f, "Always")?,
            Condition::TaskState { task_id, state } => {
                writeln!(f, "TaskState: {} is {}", task_id, state)?
            }
            Condition::EdgeCondition { edge_id, condition } => {
                writeln!(f, "EdgeCondition: {} [{}]", edge_id, condition)?
            }
            Condition::RetrievalState { state } => writeln!(f, "RetrievalState: {}", state)?,
            Condition::StepActivated { step_id } => writeln!(f, "StepActivated: {}", step_id)?,
            Condition::And { conditions } => {
                Self::fmt_group(f, "AND", conditions, &child_prefix)?
            }
            Condition::Or { conditions } => Self::fmt_group(f, "OR", conditions, &child_prefix)?,
            Condition::Not { condition } => {
                writeln!(f, "NOT")?;
                Self::fmt_as_tree(condition, f, &child_prefix, true)?;
            }
        }
        Ok(())
    }

    fn fmt_group(
        f: &mut fmt::Formatter<'_>,
        name: &str,
        conditions: &[Condition],
        prefix: &str,
    ) -> fmt::Result {
        writeln!(f, "{}", name)?;
        if conditions.is_empty() {
            writeln!(f, "{}└── <empty>", prefix)?;
        }
        for (i, c) in conditions.iter().enumerate() {
            Self::fmt_as_tree(c, f, prefix, i + 1 == conditions.len())?;
        }
        Ok(())
    }
}
