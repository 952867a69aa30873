use super::conditions::{
    build_recovery_first_action_condition, build_recovery_sequential_condition,
    build_step_condition,
};
use crate::condition::{Condition, ExecutionState, StepType};
use crate::error::CompileError;
use crate::flow::{
    AssembledDdt, CompiledTask, DdtExpansion, DdtStep, Escalation, RecoveryExpansion,
    StepExpansion, TaskSource,
};
use crate::resolver::TaskResolver;
use tracing::{debug, warn};

/// Compiled tasks produced by one dialogue template, plus its traceability record.
#[derive(Debug, Clone, Default)]
pub struct ExpandedDdt {
    pub tasks: Vec<CompiledTask>,
    pub expansion: DdtExpansion,
}

/// Expands a dialogue template's step / escalation / action hierarchy into compiled tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DdtExpander {
    strict_step_types: bool,
}

impl DdtExpander {
    pub fn new(strict_step_types: bool) -> Self {
        Self { strict_step_types }
    }

    /// Expands `ddt` under `parent_node_id`.
    ///
    /// Unresolvable action references are skipped with a warning. The only error is
    /// an unknown step type while strict step validation is enabled.
    pub fn expand<R: TaskResolver + ?Sized>(
        &self,
        ddt: &AssembledDdt,
        parent_node_id: &str,
        resolver: &R,
        parent_row_action: &str,
    ) -> Result<ExpandedDdt, CompileError> {
        let mut output = ExpandedDdt {
            tasks: Vec::new(),
            expansion: DdtExpansion {
                ddt_id: ddt.id.clone(),
                node_id: parent_node_id.to_string(),
                steps: Vec::new(),
            },
        };

        let Some(steps) = ddt.steps() else {
            debug!(ddt_id = %ddt.id, "dialogue template has no steps; nothing to expand");
            return Ok(output);
        };

        for step in steps {
            if self.strict_step_types && StepType::parse(&step.step_type).is_none() {
                return Err(CompileError::UnknownStepType {
                    node_id: parent_node_id.to_string(),
                    step_type: step.step_type.clone(),
                });
            }
            let step_expansion =
                self.expand_step(step, parent_node_id, resolver, parent_row_action, &mut output.tasks);
            output.expansion.steps.push(step_expansion);
        }

        debug!(
            ddt_id = %ddt.id,
            node_id = parent_node_id,
            tasks = output.tasks.len(),
            "expanded dialogue template"
        );
        Ok(output)
    }

    fn expand_step<R: TaskResolver + ?Sized>(
        &self,
        step: &DdtStep,
        parent_node_id: &str,
        resolver: &R,
        parent_row_action: &str,
        tasks: &mut Vec<CompiledTask>,
    ) -> StepExpansion {
        // Scoped by parent node so one template reused on several nodes keeps distinct steps.
        let step_id = format!("ddt-step-{}-{}", parent_node_id, step.step_type);
        let step_condition = build_step_condition(&step.step_type);

        let recoveries = step
            .escalations
            .iter()
            .enumerate()
            .map(|(index, escalation)| {
                let recovery_id = escalation
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("{}-escalation-{}", step.step_type, index));
                let action_ids = Self::expand_escalation(
                    escalation,
                    &EscalationScope {
                        parent_node_id,
                        step_type: &step.step_type,
                        step_id: &step_id,
                        step_condition: &step_condition,
                        recovery_id: &recovery_id,
                        parent_row_action,
                    },
                    resolver,
                    tasks,
                );
                RecoveryExpansion {
                    recovery_id,
                    action_ids,
                }
            })
            .collect();

        StepExpansion {
            step_id,
            step_type: step.step_type.clone(),
            recoveries,
        }
    }

    /// Compiles one escalation's action list, returning the ids of the tasks it emitted.
    fn expand_escalation<R: TaskResolver + ?Sized>(
        escalation: &Escalation,
        scope: &EscalationScope<'_>,
        resolver: &R,
        tasks: &mut Vec<CompiledTask>,
    ) -> Vec<String> {
        let mut action_ids: Vec<String> = Vec::with_capacity(escalation.tasks.len());

        for (index, task_ref) in escalation.tasks.iter().enumerate() {
            let reference = task_ref
                .id
                .clone()
                .unwrap_or_else(|| format!("{}-action-{}", scope.recovery_id, index));

            let Some(task) = resolver.get_task(&reference) else {
                warn!(
                    task_id = %reference,
                    node_id = scope.parent_node_id,
                    step_type = scope.step_type,
                    recovery_id = scope.recovery_id,
                    "dialogue action references a missing task; skipping it"
                );
                continue;
            };

            // The chain links resolved actions only, so a skipped action never becomes a dependency.
            let condition = match action_ids.last() {
                None => Condition::and(vec![
                    scope.step_condition.clone(),
                    build_recovery_first_action_condition(scope.step_id),
                ]),
                Some(previous) => build_recovery_sequential_condition(previous),
            };

            tasks.push(CompiledTask {
                id: task.id.clone(),
                action: task.action.clone(),
                value: task.value_fields(),
                condition,
                state: ExecutionState::UnExecuted,
                source: TaskSource::DdtRecoveryAction {
                    node_id: scope.parent_node_id.to_string(),
                    step_type: scope.step_type.to_string(),
                    recovery_id: scope.recovery_id.to_string(),
                    action_id: task.id.clone(),
                    parent_row_action: scope.parent_row_action.to_string(),
                },
            });
            action_ids.push(task.id.clone());
        }

        action_ids
    }
}

/// Identifiers shared by every action of one escalation.
struct EscalationScope<'a> {
    parent_node_id: &'a str,
    step_type: &'a str,
    step_id: &'a str,
    step_condition: &'a Condition,
    recovery_id: &'a str,
    parent_row_action: &'a str,
}

/// Expands a dialogue template with lenient step handling.
pub fn expand_ddt<R: TaskResolver + ?Sized>(
    ddt: &AssembledDdt,
    parent_node_id: &str,
    resolver: &R,
    parent_row_action: &str,
) -> ExpandedDdt {
    DdtExpander::new(false)
        .expand(ddt, parent_node_id, resolver, parent_row_action)
        .unwrap_or_default()
}
