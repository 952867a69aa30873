//! Common test utilities for building flow graphs, task catalogs and dialogue templates.
use flowc::prelude::*;

/// A node whose rows reference tasks by their own row ids.
#[allow(dead_code)]
pub fn node(id: &str, row_ids: &[&str]) -> FlowNode {
    FlowNode {
        id: id.to_string(),
        rows: row_ids
            .iter()
            .map(|row_id| Row {
                id: row_id.to_string(),
                task_id: None,
            })
            .collect(),
    }
}

/// An unconditioned edge.
#[allow(dead_code)]
pub fn edge(id: &str, source: &str, target: &str) -> FlowEdge {
    FlowEdge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        label: None,
        predicate: None,
        is_else: false,
    }
}

#[allow(dead_code)]
pub fn predicate_edge(id: &str, source: &str, target: &str, predicate: &str) -> FlowEdge {
    FlowEdge {
        predicate: Some(predicate.to_string()),
        ..edge(id, source, target)
    }
}

#[allow(dead_code)]
pub fn else_edge(id: &str, source: &str, target: &str) -> FlowEdge {
    FlowEdge {
        is_else: true,
        ..edge(id, source, target)
    }
}

/// A catalog holding a plain message task for every row of every node.
#[allow(dead_code)]
pub fn catalog_for(nodes: &[FlowNode]) -> TaskCatalog {
    let mut catalog = TaskCatalog::new();
    for row in nodes.iter().flat_map(|n| &n.rows) {
        catalog.insert_task(message_task(row.task_id()));
    }
    catalog
}

#[allow(dead_code)]
pub fn message_task(id: &str) -> Task {
    Task::new(id, "SayMessage").with_field("text", serde_json::json!(format!("text of {}", id)))
}

/// A data-collection task that drives a dialogue template.
#[allow(dead_code)]
pub fn data_request_task(id: &str) -> Task {
    Task::new(id, "DataRequest").with_field("mainData", serde_json::json!([{ "label": "name" }]))
}

#[allow(dead_code)]
pub fn escalation(id: Option<&str>, refs: &[&str]) -> Escalation {
    Escalation {
        id: id.map(str::to_string),
        tasks: refs.iter().map(|r| TaskRef::new(*r)).collect(),
    }
}

#[allow(dead_code)]
pub fn step(step_type: &str, escalations: Vec<Escalation>) -> DdtStep {
    DdtStep {
        step_type: step_type.to_string(),
        escalations,
    }
}

#[allow(dead_code)]
pub fn ddt(id: &str, steps: Vec<DdtStep>) -> AssembledDdt {
    AssembledDdt {
        id: id.to_string(),
        main_data: Some(DdtMainData { steps: Some(steps) }),
    }
}

/// A name-collection dialogue:
///
/// - `start`: one escalation `[ask-name, ask-name-hint]`
/// - `noMatch`: escalations `nm-1: [reprompt]` and an unnamed one `[reprompt-slow]`
#[allow(dead_code)]
pub fn name_dialogue() -> AssembledDdt {
    ddt(
        "ddt-name",
        vec![
            step(
                "start",
                vec![escalation(Some("start-1"), &["ask-name", "ask-name-hint"])],
            ),
            step(
                "noMatch",
                vec![
                    escalation(Some("nm-1"), &["reprompt"]),
                    escalation(None, &["reprompt-slow"]),
                ],
            ),
        ],
    )
}

/// Message tasks for every action referenced by `name_dialogue`.
#[allow(dead_code)]
pub fn with_dialogue_actions(catalog: TaskCatalog) -> TaskCatalog {
    ["ask-name", "ask-name-hint", "reprompt", "reprompt-slow"]
        .into_iter()
        .fold(catalog, |catalog, id| catalog.with_task(message_task(id)))
}
