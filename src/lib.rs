//! # flowc - Conversation Flow Compiler
//!
//! **flowc** compiles an authored conversation graph (nodes holding ordered task rows,
//! edges carrying branch predicates) plus nested multi-turn dialogue templates ("DDTs")
//! into a flat list of independently schedulable tasks. Each compiled task is guarded by
//! a declarative, serializable readiness [`Condition`](condition::Condition) that a
//! stateless runtime can evaluate without re-walking the graph.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Data**: Parse the editor's JSON into the raw `ui` types, or into your own structs.
//! 2.  **Convert to the Canonical Model**: `IntoFlow` turns any editor format into a `FlowDefinition`.
//! 3.  **Provide Lookups**: Implement `TaskResolver`, or fill a `TaskCatalog`, with every task and template the flow references.
//! 4.  **Compile**: `Compiler::builder(flow).build().compile(&resolver)` yields the compiled tasks,
//!     the entry task id and a traceability index of expanded dialogue templates.
//!
//! The pass is pure and deterministic: identical inputs always produce identical ids,
//! conditions and ordering, because the runtime persists execution state keyed by task id.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowc::prelude::*;
//!
//! let flow = FlowDefinition {
//!     nodes: vec![
//!         FlowNode { id: "A".into(), rows: vec![Row { id: "r1".into(), task_id: None }] },
//!         FlowNode { id: "B".into(), rows: vec![Row { id: "r2".into(), task_id: None }] },
//!     ],
//!     edges: vec![FlowEdge {
//!         id: "e1".into(),
//!         source: "A".into(),
//!         target: "B".into(),
//!         label: None,
//!         predicate: None,
//!         is_else: false,
//!     }],
//! };
//!
//! let catalog = TaskCatalog::new()
//!     .with_task(Task::new("r1", "SayMessage"))
//!     .with_task(Task::new("r2", "SayMessage"));
//!
//! let compiled = Compiler::builder(flow).build().compile(&catalog)?;
//!
//! assert_eq!(compiled.entry_task_id.as_deref(), Some("r1"));
//! assert_eq!(compiled.task("r2").unwrap().condition, Condition::task_executed("r1"));
//! # Ok::<(), CompileError>(())
//! ```

pub mod compiler;
pub mod condition;
pub mod data;
pub mod error;
pub mod flow;
pub mod prelude;
pub mod resolver;
pub mod ui;
