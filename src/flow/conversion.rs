use super::definition::FlowDefinition;
use crate::error::FlowConversionError;

/// A trait for editor data models that can be converted into a canonical `FlowDefinition`.
///
/// This is the single place where upstream schema drift is resolved. By implementing
/// this trait on your own structs, you provide a translation layer that lets the
/// compiler work only with canonical types.
///
/// # Example
///
/// ```rust
/// use flowc::error::FlowConversionError;
/// use flowc::flow::{FlowDefinition, FlowNode, IntoFlow, Row};
///
/// struct MyNode { id: String, steps: Vec<String> }
/// struct MyFlow { nodes: Vec<MyNode> }
///
/// impl IntoFlow for MyFlow {
///     fn into_flow(self) -> Result<FlowDefinition, FlowConversionError> {
///         let nodes = self
///             .nodes
///             .into_iter()
///             .map(|node| FlowNode {
///                 id: node.id,
///                 rows: node
///                     .steps
///                     .into_iter()
///                     .map(|id| Row { id, task_id: None })
///                     .collect(),
///             })
///             .collect();
///
///         Ok(FlowDefinition { nodes, edges: vec![] })
///     }
/// }
/// ```
pub trait IntoFlow {
    /// Consumes the object and converts it into a canonical flow graph.
    fn into_flow(self) -> Result<FlowDefinition, FlowConversionError>;
}
