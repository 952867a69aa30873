//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowc crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowc::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let bundle = FlowBundle::from_file("path/to/bundle.json")?;
//! let compiled = Compiler::builder(bundle.flow).build().compile(&bundle.catalog)?;
//!
//! for task in &compiled.tasks {
//!     println!("{}: {}", task.id, ConditionFormatter::format(&task.condition));
//! }
//! # Ok(())
//! # }
//! ```

// Compilation
pub use crate::compiler::{
    Compiler, CompilerBuilder, DdtExpander, ExpandedDdt, FlowIndex, build_first_row_condition,
    build_recovery_first_action_condition, build_recovery_sequential_condition,
    build_sequential_condition, build_step_condition, compile_flow, expand_ddt,
};

// Condition algebra
pub use crate::condition::{
    Condition, ConditionFormatter, DisplayCondition, ExecutionState, RetrievalState, StepType,
};

// Graph, task and output model
pub use crate::flow::{
    AssembledDdt, CompilationResult, CompiledTask, DdtExpansion, DdtMainData, DdtStep,
    Escalation, FlowDefinition, FlowEdge, FlowNode, IntoFlow, RecoveryExpansion, Row,
    StepExpansion, Task, TaskRef, TaskSource,
};

// Lookups and inputs
pub use crate::data::FlowBundle;
pub use crate::resolver::{FnResolver, TaskCatalog, TaskResolver};
pub use crate::ui::UiFlow;

// Error types
pub use crate::error::{ArtifactError, CompileError, FlowConversionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
