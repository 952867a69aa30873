//! Pure constructors that translate graph topology and dialogue-step semantics
//! into condition trees.

use crate::condition::{Condition, RetrievalState, StepType};
use crate::flow::{FlowEdge, FlowNode};
use ahash::AHashMap;
use tracing::warn;

/// Adjacency index over a flow graph, built once per compilation pass.
///
/// Every list preserves the input order of the edges it was built from.
pub struct FlowIndex<'a> {
    nodes: AHashMap<&'a str, &'a FlowNode>,
    incoming: AHashMap<&'a str, Vec<&'a FlowEdge>>,
    outgoing: AHashMap<&'a str, Vec<&'a FlowEdge>>,
}

impl<'a> FlowIndex<'a> {
    pub fn new(nodes: &'a [FlowNode], edges: &'a [FlowEdge]) -> Self {
        let mut node_map = AHashMap::with_capacity(nodes.len());
        for node in nodes {
            // First declaration wins on duplicate ids, matching a linear scan.
            node_map.entry(node.id.as_str()).or_insert(node);
        }

        let mut incoming: AHashMap<&str, Vec<&FlowEdge>> = AHashMap::new();
        let mut outgoing: AHashMap<&str, Vec<&FlowEdge>> = AHashMap::new();
        for edge in edges {
            incoming.entry(edge.target.as_str()).or_default().push(edge);
            outgoing.entry(edge.source.as_str()).or_default().push(edge);
        }

        Self {
            nodes: node_map,
            incoming,
            outgoing,
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&'a FlowNode> {
        self.nodes.get(node_id).copied()
    }

    pub fn incoming(&self, node_id: &str) -> &[&'a FlowEdge] {
        self.incoming.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn outgoing(&self, node_id: &str) -> &[&'a FlowEdge] {
        self.outgoing.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_entry(&self, node_id: &str) -> bool {
        self.incoming(node_id).is_empty()
    }

    /// Arrival condition for the first row of a node: true once any upstream link fires.
    pub fn first_row_condition(&self, node_id: &str) -> Condition {
        let incoming = self.incoming(node_id);
        if incoming.is_empty() {
            return Condition::Always;
        }

        let (else_edges, normal_edges): (Vec<&FlowEdge>, Vec<&FlowEdge>) =
            incoming.iter().copied().partition(|edge| edge.is_else());

        let mut links: Vec<Condition> = normal_edges
            .into_iter()
            .map(|edge| self.link_condition(edge))
            .collect();
        links.extend(
            else_edges
                .into_iter()
                .map(|edge| self.else_link_condition(edge)),
        );

        if links.len() == 1 {
            links.remove(0)
        } else {
            Condition::or(links)
        }
    }

    fn link_condition(&self, edge: &FlowEdge) -> Condition {
        let source_done = Condition::task_executed(self.last_task_of(edge));
        match edge.predicate() {
            Some(predicate) => Condition::and(vec![source_done, Condition::edge(&edge.id, predicate)]),
            None => source_done,
        }
    }

    /// An else edge fires when its source is done and none of the sibling
    /// predicates leaving the same source hold, whatever their targets are.
    fn else_link_condition(&self, edge: &FlowEdge) -> Condition {
        let source_done = Condition::task_executed(self.last_task_of(edge));

        let alternatives: Vec<Condition> = self
            .outgoing(&edge.source)
            .iter()
            .filter(|sibling| sibling.id != edge.id && !sibling.is_else())
            .filter_map(|sibling| {
                sibling
                    .predicate()
                    .map(|predicate| Condition::edge(&sibling.id, predicate))
            })
            .collect();

        if alternatives.is_empty() {
            return source_done;
        }
        Condition::and(vec![
            source_done,
            Condition::not(Condition::or(alternatives)),
        ])
    }

    /// Task id of the last row of the edge's source node.
    ///
    /// Falls back to the source node id when the node is unknown or has no rows.
    fn last_task_of(&self, edge: &FlowEdge) -> String {
        match self.node(&edge.source).and_then(FlowNode::last_row_task_id) {
            Some(task_id) => task_id.to_string(),
            None => {
                warn!(
                    edge_id = %edge.id,
                    source = %edge.source,
                    "edge source has no rows; waiting on the node id instead"
                );
                edge.source.clone()
            }
        }
    }
}

/// Arrival condition for the first row of `node_id`.
///
/// Convenience form that indexes the graph for a single lookup; the compiler
/// builds one `FlowIndex` per pass instead.
pub fn build_first_row_condition(node_id: &str, nodes: &[FlowNode], edges: &[FlowEdge]) -> Condition {
    FlowIndex::new(nodes, edges).first_row_condition(node_id)
}

pub fn build_sequential_condition(prev_task_id: &str) -> Condition {
    Condition::task_executed(prev_task_id)
}

/// Retrieval state guard for a dialogue step.
///
/// Unknown step types fall back to `empty` with a warning; use strict step
/// validation on the compiler to reject them instead.
pub fn build_step_condition(step_type: &str) -> Condition {
    let state = match StepType::parse(step_type) {
        Some(known) => known.retrieval_state(),
        None => {
            warn!(step_type, "unknown dialogue step type; treating it as 'start'");
            RetrievalState::Empty
        }
    };
    Condition::RetrievalState { state }
}

pub fn build_recovery_first_action_condition(step_id: &str) -> Condition {
    Condition::step_activated(step_id)
}

pub fn build_recovery_sequential_condition(prev_action_task_id: &str) -> Condition {
    Condition::task_executed(prev_action_task_id)
}
