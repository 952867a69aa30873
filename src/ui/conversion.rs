use super::types::*;
use crate::error::FlowConversionError;
use crate::flow::{
    AssembledDdt, DdtMainData, DdtStep, Escalation, FlowDefinition, FlowEdge, FlowNode, IntoFlow,
    Row, TaskRef,
};

impl UiFlow {
    pub fn from_json(json: &str) -> Result<Self, FlowConversionError> {
        serde_json::from_str(json).map_err(|e| FlowConversionError::JsonParseError(e.to_string()))
    }
}

impl IntoFlow for UiFlow {
    fn into_flow(self) -> Result<FlowDefinition, FlowConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(UiNode::into_node)
            .collect::<Result<Vec<_>, _>>()?;
        let edges = self
            .edges
            .into_iter()
            .map(UiEdge::into_edge)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FlowDefinition { nodes, edges })
    }
}

impl UiNode {
    fn into_node(self) -> Result<FlowNode, FlowConversionError> {
        if self.id.trim().is_empty() {
            return Err(FlowConversionError::ValidationError(
                "node without an id".to_string(),
            ));
        }

        // Top-level rows win; `data.rows` is the older location.
        let rows = match (self.rows, self.data) {
            (Some(rows), _) if !rows.is_empty() => rows,
            (_, Some(data)) => data.rows,
            (rows, None) => rows.unwrap_or_default(),
        };

        Ok(FlowNode {
            id: self.id,
            rows: rows
                .into_iter()
                .map(|row| Row {
                    id: row.id,
                    task_id: non_blank(row.task_id),
                })
                .collect(),
        })
    }
}

impl UiEdge {
    fn into_edge(self) -> Result<FlowEdge, FlowConversionError> {
        if self.source.is_empty() || self.target.is_empty() {
            return Err(FlowConversionError::ValidationError(format!(
                "edge '{}' is missing its source or target",
                self.id
            )));
        }

        let UiEdgeData {
            label,
            condition,
            condition_id,
            is_else,
        } = self.data.unwrap_or_default();

        Ok(FlowEdge {
            id: self.id,
            source: self.source,
            target: self.target,
            label: self.label.or(label),
            predicate: non_blank(condition).or_else(|| non_blank(condition_id)),
            is_else: is_else.unwrap_or(false),
        })
    }
}

impl From<UiDdt> for AssembledDdt {
    fn from(raw: UiDdt) -> Self {
        let main_data = raw.main_data.and_then(|repr| match repr {
            UiMainDataRepr::One(data) => Some(data),
            UiMainDataRepr::Many(items) => items.into_iter().next(),
        });

        AssembledDdt {
            id: raw.id,
            main_data: main_data.map(|data| DdtMainData {
                steps: data.steps.map(normalize_steps),
            }),
        }
    }
}

fn normalize_steps(steps: UiSteps) -> Vec<DdtStep> {
    match steps {
        UiSteps::List(steps) => steps
            .into_iter()
            .map(|step| {
                let step_type = step.step_type.clone().unwrap_or_default();
                normalize_step(step_type, step)
            })
            .collect(),
        UiSteps::Keyed(steps) => steps
            .into_iter()
            .map(|(key, step)| {
                let step_type = step.step_type.clone().unwrap_or(key);
                normalize_step(step_type, step)
            })
            .collect(),
    }
}

fn normalize_step(step_type: String, step: UiStep) -> DdtStep {
    DdtStep {
        step_type,
        escalations: step
            .escalations
            .into_iter()
            .map(|escalation| Escalation {
                id: escalation.id,
                tasks: escalation
                    .tasks
                    .or(escalation.actions)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|item| TaskRef {
                        id: non_blank(item.id)
                            .or_else(|| non_blank(item.instance_id))
                            .or_else(|| non_blank(item.template_id))
                            .or_else(|| non_blank(item.action_id)),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Blank strings count as missing, so an empty current field falls through to its legacy alias.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
