use crate::condition::ExecutionState;
use crate::error::CompileError;
use crate::flow::{CompilationResult, CompiledTask, FlowDefinition, FlowEdge, FlowNode, Task, TaskSource};
use crate::resolver::TaskResolver;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub mod conditions;
pub mod ddt;

pub use conditions::*;
pub use ddt::*;

/// Action kinds that drive a nested dialogue template when they carry `mainData`.
pub const DEFAULT_DIALOGUE_ACTIONS: [&str; 2] = ["DataRequest", "ProblemClassification"];

/// Tunables for a compilation pass.
#[derive(Debug, Clone)]
struct CompileOptions {
    dialogue_actions: Vec<String>,
    strict_step_types: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            dialogue_actions: DEFAULT_DIALOGUE_ACTIONS.iter().map(|a| a.to_string()).collect(),
            strict_step_types: false,
        }
    }
}

/// Compiles a flow graph into a flat list of condition-guarded tasks.
pub struct Compiler {
    flow: FlowDefinition,
    options: CompileOptions,
}

pub struct CompilerBuilder {
    flow: FlowDefinition,
    options: CompileOptions,
}

impl CompilerBuilder {
    pub fn new(flow: FlowDefinition) -> Self {
        Self {
            flow,
            options: CompileOptions::default(),
        }
    }

    /// Treats `action` as a dialogue-driving action kind in addition to the defaults.
    pub fn with_dialogue_action(mut self, action: &str) -> Self {
        if !self.options.dialogue_actions.iter().any(|a| a == action) {
            self.options.dialogue_actions.push(action.to_string());
        }
        self
    }

    /// Rejects dialogue steps of unknown type instead of treating them as `start`.
    pub fn strict_step_types(mut self, strict: bool) -> Self {
        self.options.strict_step_types = strict;
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            flow: self.flow,
            options: self.options,
        }
    }
}

impl Compiler {
    pub fn builder(flow: FlowDefinition) -> CompilerBuilder {
        CompilerBuilder::new(flow)
    }

    pub fn flow(&self) -> &FlowDefinition {
        &self.flow
    }

    pub fn compile<R: TaskResolver + ?Sized>(
        &self,
        resolver: &R,
    ) -> Result<CompilationResult, CompileError> {
        compile_graph(&self.flow.nodes, &self.flow.edges, resolver, &self.options)
    }
}

/// Compiles `nodes` and `edges` with the default configuration.
///
/// Returns an empty result when the graph has no entry node, and fails when a
/// row references a task the resolver does not know.
pub fn compile_flow<R: TaskResolver + ?Sized>(
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    resolver: &R,
) -> Result<CompilationResult, CompileError> {
    compile_graph(nodes, edges, resolver, &CompileOptions::default())
}

fn compile_graph<R: TaskResolver + ?Sized>(
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    resolver: &R,
    options: &CompileOptions,
) -> Result<CompilationResult, CompileError> {
    let index = FlowIndex::new(nodes, edges);

    let mut entry_nodes = nodes.iter().filter(|node| index.is_entry(&node.id));
    let Some(entry_node) = entry_nodes.next() else {
        warn!(
            nodes = nodes.len(),
            edges = edges.len(),
            "flow has no entry node; returning an empty compilation"
        );
        return Ok(CompilationResult::empty());
    };
    let extra_entries = entry_nodes.count();
    if extra_entries > 0 {
        debug!(
            entry_node = %entry_node.id,
            ignored = extra_entries,
            "flow has several entry nodes; using the first one"
        );
    }

    let expander = DdtExpander::new(options.strict_step_types);
    let mut tasks: Vec<CompiledTask> = Vec::new();
    let mut expansions: BTreeMap<String, Vec<_>> = BTreeMap::new();
    let mut entry_task_id = None;

    for node in nodes {
        let mut previous_task_id: Option<&str> = None;

        for row in &node.rows {
            let task_id = row.task_id();
            let task = resolver
                .get_task(task_id)
                .ok_or_else(|| CompileError::TaskNotFound {
                    task_id: task_id.to_string(),
                    node_id: node.id.clone(),
                    row_id: row.id.clone(),
                })?;

            let condition = match previous_task_id {
                None => index.first_row_condition(&node.id),
                Some(previous) => build_sequential_condition(previous),
            };

            if previous_task_id.is_none() && std::ptr::eq(node, entry_node) {
                entry_task_id = Some(task_id.to_string());
            }

            tasks.push(CompiledTask {
                id: task_id.to_string(),
                action: task.action.clone(),
                value: task.value_fields(),
                condition,
                state: ExecutionState::UnExecuted,
                source: TaskSource::FlowRow {
                    node_id: node.id.clone(),
                    row_id: row.id.clone(),
                },
            });

            if drives_dialogue(task, options) {
                match resolver.get_ddt(&task.id) {
                    Some(ddt) => {
                        let expanded = expander.expand(ddt, &node.id, resolver, &task.action)?;
                        tasks.extend(expanded.tasks);
                        expansions
                            .entry(node.id.clone())
                            .or_default()
                            .push(expanded.expansion);
                    }
                    None => debug!(
                        task_id = %task.id,
                        node_id = %node.id,
                        "dialogue task has no assembled template; compiling the row only"
                    ),
                }
            }

            previous_task_id = Some(task_id);
        }
    }

    info!(
        tasks = tasks.len(),
        entry_task = entry_task_id.as_deref().unwrap_or("<none>"),
        "flow compiled"
    );
    Ok(CompilationResult::new(tasks, entry_task_id, expansions))
}

fn drives_dialogue(task: &Task, options: &CompileOptions) -> bool {
    options.dialogue_actions.iter().any(|a| *a == task.action) && task.has_main_data()
}
