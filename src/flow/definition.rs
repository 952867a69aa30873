/// The complete, canonical definition of a conversation flow graph, ready for compilation.
/// This is the target structure for any custom editor format conversion.
#[derive(Debug, Clone, Default)]
pub struct FlowDefinition {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

/// A node of the flow graph: an ordered list of rows, each referencing one task.
#[derive(Debug, Clone)]
pub struct FlowNode {
    pub id: String,
    pub rows: Vec<Row>,
}

impl FlowNode {
    /// Task id of the last row, which is what downstream edges wait on.
    pub fn last_row_task_id(&self) -> Option<&str> {
        self.rows.last().map(Row::task_id)
    }
}

/// A single row inside a node.
#[derive(Debug, Clone)]
pub struct Row {
    pub id: String,
    pub task_id: Option<String>,
}

impl Row {
    /// The task this row references. A row without an explicit task id uses its own id.
    pub fn task_id(&self) -> &str {
        self.task_id.as_deref().unwrap_or(&self.id)
    }
}

/// A directed connection between two nodes, optionally guarded by a predicate.
#[derive(Debug, Clone)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Option<String>,
    /// Reference to the predicate the runtime evaluates when leaving the source node.
    pub predicate: Option<String>,
    pub is_else: bool,
}

impl FlowEdge {
    /// An edge is the "else" branch of its source when flagged, or when labelled `Else`.
    pub fn is_else(&self) -> bool {
        self.is_else || self.label.as_deref().map(str::trim) == Some("Else")
    }

    /// The predicate reference, ignoring blank strings left behind by the editor.
    pub fn predicate(&self) -> Option<&str> {
        self.predicate.as_deref().filter(|p| !p.trim().is_empty())
    }
}
