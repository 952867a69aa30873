use thiserror::Error;

/// Errors that abort a compilation pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Task '{task_id}' referenced by row '{row_id}' of node '{node_id}' could not be resolved")]
    TaskNotFound {
        task_id: String,
        node_id: String,
        row_id: String,
    },

    #[error("Dialogue under node '{node_id}' declares an unknown step type: '{step_type}'")]
    UnknownStepType { node_id: String, step_type: String },
}

/// Errors that can occur when converting an editor format into a canonical `FlowDefinition`.
#[derive(Error, Debug, Clone)]
pub enum FlowConversionError {
    #[error("Failed to parse flow JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid flow data: {0}")]
    ValidationError(String),
}

/// Errors raised while reading or writing bundles and compiled artifacts.
#[derive(Error, Debug, Clone)]
pub enum ArtifactError {
    #[error("{0}")]
    Generic(String),

    #[error(transparent)]
    Conversion(#[from] FlowConversionError),
}
