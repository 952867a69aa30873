use crate::condition::{Condition, ExecutionState};
use crate::error::ArtifactError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;

/// A flat, independently schedulable unit guarded by a readiness condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledTask {
    /// Stable across recompilations: the runtime keys persisted execution state by it.
    pub id: String,
    pub action: String,
    pub value: Map<String, Value>,
    pub condition: Condition,
    pub state: ExecutionState,
    pub source: TaskSource,
}

/// Where a compiled task came from, for highlighting in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TaskSource {
    #[serde(rename = "flow-row", rename_all = "camelCase")]
    FlowRow { node_id: String, row_id: String },

    #[serde(rename = "ddt-recovery-action", rename_all = "camelCase")]
    DdtRecoveryAction {
        node_id: String,
        step_type: String,
        recovery_id: String,
        action_id: String,
        parent_row_action: String,
    },
}

impl TaskSource {
    pub fn node_id(&self) -> &str {
        match self {
            TaskSource::FlowRow { node_id, .. } | TaskSource::DdtRecoveryAction { node_id, .. } => {
                node_id
            }
        }
    }
}

/// Traceability record of one dialogue template expanded under a node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DdtExpansion {
    pub ddt_id: String,
    pub node_id: String,
    pub steps: Vec<StepExpansion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepExpansion {
    pub step_id: String,
    pub step_type: String,
    pub recoveries: Vec<RecoveryExpansion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryExpansion {
    pub recovery_id: String,
    pub action_ids: Vec<String>,
}

/// The output of one compilation pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ArtifactData")]
pub struct CompilationResult {
    pub tasks: Vec<CompiledTask>,
    pub entry_task_id: Option<String>,
    /// Node id -> dialogue templates expanded under that node, in compilation order.
    pub expansions: BTreeMap<String, Vec<DdtExpansion>>,
    #[serde(skip)]
    task_map: AHashMap<String, usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactData {
    tasks: Vec<CompiledTask>,
    entry_task_id: Option<String>,
    #[serde(default)]
    expansions: BTreeMap<String, Vec<DdtExpansion>>,
}

impl From<ArtifactData> for CompilationResult {
    fn from(data: ArtifactData) -> Self {
        CompilationResult::new(data.tasks, data.entry_task_id, data.expansions)
    }
}

impl CompilationResult {
    pub fn new(
        tasks: Vec<CompiledTask>,
        entry_task_id: Option<String>,
        expansions: BTreeMap<String, Vec<DdtExpansion>>,
    ) -> Self {
        // Later tasks win, so a DDT action reused under several nodes maps to its last copy.
        let task_map = tasks
            .iter()
            .enumerate()
            .map(|(index, task)| (task.id.clone(), index))
            .collect();
        Self {
            tasks,
            entry_task_id,
            expansions,
            task_map,
        }
    }

    /// The empty-but-valid result returned for graphs without an entry node.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up a compiled task by id.
    pub fn task(&self, id: &str) -> Option<&CompiledTask> {
        self.task_map.get(id).map(|&index| &self.tasks[index])
    }

    pub fn entry_task(&self) -> Option<&CompiledTask> {
        self.entry_task_id.as_deref().and_then(|id| self.task(id))
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String, ArtifactError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ArtifactError::Generic(format!("Serialization failed: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        serde_json::from_str(json)
            .map_err(|e| ArtifactError::Generic(format!("Deserialization failed: {}", e)))
    }

    /// Saves the compiled flow to a file as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|e| {
            ArtifactError::Generic(format!("Could not write to file '{}': {}", path, e))
        })
    }

    /// Loads a compiled flow from a file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let json = fs::read_to_string(path).map_err(|e| {
            ArtifactError::Generic(format!("Could not read from file '{}': {}", path, e))
        })?;
        Self::from_json(&json)
    }
}
