use crate::error::{ArtifactError, FlowConversionError};
use crate::flow::{AssembledDdt, FlowDefinition, IntoFlow};
use crate::resolver::TaskCatalog;
use crate::ui::{UiBundle, UiFlow};
use std::fs;

/// A flow together with the task and template snapshot it is compiled against.
#[derive(Debug, Clone, Default)]
pub struct FlowBundle {
    pub flow: FlowDefinition,
    pub catalog: TaskCatalog,
}

impl FlowBundle {
    /// Load a bundle from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ArtifactError::Generic(format!("Could not read bundle '{}': {}", path, e))
        })?;
        Ok(Self::from_json(&content)?)
    }

    /// Parse a bundle from JSON, normalizing every upstream schema variant on the way in.
    pub fn from_json(json: &str) -> Result<Self, FlowConversionError> {
        let raw: UiBundle = serde_json::from_str(json)
            .map_err(|e| FlowConversionError::JsonParseError(e.to_string()))?;

        let flow = UiFlow {
            nodes: raw.nodes,
            edges: raw.edges,
        }
        .into_flow()?;

        let mut catalog = TaskCatalog::new();
        for task in raw.tasks {
            catalog.insert_task(task);
        }
        for (task_id, ddt) in raw.ddts {
            catalog.insert_ddt(task_id, AssembledDdt::from(ddt));
        }

        Ok(Self { flow, catalog })
    }
}
