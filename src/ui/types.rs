use crate::flow::Task;
use ahash::AHashMap;
use serde::Deserialize;
use indexmap::IndexMap;

/// A row as stored by the editor.
#[derive(Debug, Deserialize, Clone)]
pub struct UiRow {
    pub id: String,
    #[serde(default, alias = "taskId")]
    pub task_id: Option<String>,
}

/// Node payload; older editors nest rows under `data`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UiNodeData {
    #[serde(default)]
    pub rows: Vec<UiRow>,
}

/// Editor node with its rows.
#[derive(Debug, Deserialize, Clone)]
pub struct UiNode {
    pub id: String,
    #[serde(default)]
    pub rows: Option<Vec<UiRow>>,
    #[serde(default)]
    pub data: Option<UiNodeData>,
}

/// Edge payload. The predicate lives under `condition`, or `conditionId` in older flows.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UiEdgeData {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default, rename = "conditionId")]
    pub condition_id: Option<String>,
    #[serde(default, alias = "isElse")]
    pub is_else: Option<bool>,
}

/// Editor edge connecting two nodes.
#[derive(Debug, Deserialize, Clone)]
pub struct UiEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub data: Option<UiEdgeData>,
}

/// Complete editor flow.
#[derive(Debug, Deserialize, Clone)]
pub struct UiFlow {
    pub nodes: Vec<UiNode>,
    #[serde(default)]
    pub edges: Vec<UiEdge>,
}

/// A task reference inside an escalation, under any of the historical id fields.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UiTaskRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "instanceId")]
    pub instance_id: Option<String>,
    #[serde(default, rename = "templateId")]
    pub template_id: Option<String>,
    #[serde(default, rename = "actionId")]
    pub action_id: Option<String>,
}

/// One retry attempt. Items are listed under `tasks`, or `actions` in older templates.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UiEscalation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tasks: Option<Vec<UiTaskRef>>,
    #[serde(default)]
    pub actions: Option<Vec<UiTaskRef>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct UiStep {
    #[serde(default, rename = "type")]
    pub step_type: Option<String>,
    #[serde(default)]
    pub escalations: Vec<UiEscalation>,
}

/// Steps arrive either as a list or as an object keyed by step type, in authored order.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum UiSteps {
    List(Vec<UiStep>),
    Keyed(IndexMap<String, UiStep>),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct UiMainData {
    #[serde(default)]
    pub steps: Option<UiSteps>,
}

/// `mainData` is a single object, or a list whose first element is the primary item.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum UiMainDataRepr {
    Many(Vec<UiMainData>),
    One(UiMainData),
}

/// An assembled dialogue template as produced by the template store.
#[derive(Debug, Deserialize, Clone)]
pub struct UiDdt {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "mainData")]
    pub main_data: Option<UiMainDataRepr>,
}

/// A self-contained compilation input: the flow plus a snapshot of the task cache.
#[derive(Debug, Deserialize, Clone)]
pub struct UiBundle {
    pub nodes: Vec<UiNode>,
    #[serde(default)]
    pub edges: Vec<UiEdge>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Dialogue templates keyed by the id of the task that drives them.
    #[serde(default)]
    pub ddts: AHashMap<String, UiDdt>,
}
