//! Unit tests for the condition algebra, its renderings and the canonical model helpers.
mod common;
use common::*;
use flowc::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeSet;

#[test]
fn test_condition_wire_shape() {
    let condition = Condition::or(vec![
        Condition::Always,
        Condition::and(vec![
            Condition::task_executed("r1"),
            Condition::edge("e1", "isYes"),
        ]),
        Condition::not(Condition::RetrievalState {
            state: RetrievalState::AsrNoMatch,
        }),
        Condition::step_activated("ddt-step-N-start"),
    ]);

    assert_eq!(
        serde_json::to_value(&condition).unwrap(),
        json!({
            "type": "Or",
            "conditions": [
                { "type": "Always" },
                {
                    "type": "And",
                    "conditions": [
                        { "type": "TaskState", "taskId": "r1", "state": "Executed" },
                        { "type": "EdgeCondition", "edgeId": "e1", "condition": "isYes" }
                    ]
                },
                {
                    "type": "Not",
                    "condition": { "type": "RetrievalState", "state": "asrNoMatch" }
                },
                { "type": "StepActivated", "stepId": "ddt-step-N-start" }
            ]
        })
    );
}

#[test]
fn test_condition_reads_back_from_json() {
    let json = r#"{
        "type": "And",
        "conditions": [
            { "type": "TaskState", "taskId": "s1", "state": "UnExecuted" },
            { "type": "Not", "condition": { "type": "EdgeCondition", "edgeId": "e2", "condition": "C2" } }
        ]
    }"#;

    let condition: Condition = serde_json::from_str(json).unwrap();

    assert_eq!(
        condition,
        Condition::and(vec![
            Condition::TaskState {
                task_id: "s1".to_string(),
                state: ExecutionState::UnExecuted,
            },
            Condition::not(Condition::edge("e2", "C2")),
        ])
    );
}

#[test]
fn test_task_source_wire_shape() {
    let row = TaskSource::FlowRow {
        node_id: "A".to_string(),
        row_id: "r1".to_string(),
    };
    let action = TaskSource::DdtRecoveryAction {
        node_id: "A".to_string(),
        step_type: "noMatch".to_string(),
        recovery_id: "nm-1".to_string(),
        action_id: "reprompt".to_string(),
        parent_row_action: "DataRequest".to_string(),
    };

    assert_eq!(
        serde_json::to_value(&row).unwrap(),
        json!({ "type": "flow-row", "nodeId": "A", "rowId": "r1" })
    );
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({
            "type": "ddt-recovery-action",
            "nodeId": "A",
            "stepType": "noMatch",
            "recoveryId": "nm-1",
            "actionId": "reprompt",
            "parentRowAction": "DataRequest"
        })
    );
    assert_eq!(action.node_id(), "A");
}

#[test]
fn test_formatter_parenthesizes_only_where_needed() {
    let guarded = Condition::and(vec![
        Condition::task_executed("r1"),
        Condition::edge("e1", "isYes"),
    ]);
    assert_eq!(
        ConditionFormatter::format(&guarded),
        "task(r1) executed AND edge(e1)[isYes]"
    );

    let exclusive = Condition::and(vec![
        Condition::task_executed("s1"),
        Condition::not(Condition::or(vec![
            Condition::edge("e1", "C1"),
            Condition::edge("e2", "C2"),
        ])),
    ]);
    assert_eq!(
        ConditionFormatter::format(&exclusive),
        "task(s1) executed AND NOT (edge(e1)[C1] OR edge(e2)[C2])"
    );

    let arrival = Condition::or(vec![
        Condition::and(vec![Condition::task_executed("a"), Condition::task_executed("b")]),
        Condition::task_executed("c"),
    ]);
    assert_eq!(
        ConditionFormatter::format(&arrival),
        "task(a) executed AND task(b) executed OR task(c) executed"
    );

    let nested = Condition::and(vec![
        Condition::or(vec![Condition::task_executed("a"), Condition::task_executed("b")]),
        Condition::step_activated("st"),
    ]);
    assert_eq!(
        ConditionFormatter::format(&nested),
        "(task(a) executed OR task(b) executed) AND step(st) active"
    );

    assert_eq!(ConditionFormatter::format(&Condition::Always), "always");
    assert_eq!(
        ConditionFormatter::format(&Condition::RetrievalState {
            state: RetrievalState::Confirmed
        }),
        "retrieval is confirmed"
    );
}

#[test]
fn test_display_condition_tree() {
    let condition = Condition::and(vec![
        Condition::task_executed("s1"),
        Condition::not(Condition::edge("e1", "C1")),
    ]);

    let rendered = DisplayCondition {
        condition: &condition,
    }
    .to_string();

    let expected = "\
└── AND
    ├── TaskState: s1 is executed
    └── NOT
        └── EdgeCondition: e1 [C1]
";
    assert_eq!(rendered, expected);
}

#[test]
fn test_condition_dependencies() {
    let condition = Condition::or(vec![
        Condition::and(vec![
            Condition::task_executed("a"),
            Condition::edge("e1", "C1"),
        ]),
        Condition::and(vec![
            Condition::task_executed("b"),
            Condition::not(Condition::or(vec![Condition::edge("e2", "C2")])),
        ]),
        Condition::step_activated("st"),
    ]);

    let mut tasks = BTreeSet::new();
    condition.task_dependencies(&mut tasks);
    let mut edges = BTreeSet::new();
    condition.edge_dependencies(&mut edges);

    assert_eq!(tasks.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(edges.into_iter().collect::<Vec<_>>(), vec!["e1", "e2"]);
    assert!(Condition::Always.is_always());
    assert!(!condition.is_always());
}

#[test]
fn test_task_main_data_detection() {
    assert!(data_request_task("ask").has_main_data());
    assert!(!message_task("say").has_main_data());
    assert!(
        !Task::new("t", "DataRequest")
            .with_field("mainData", json!({}))
            .has_main_data()
    );
    assert!(
        !Task::new("t", "DataRequest")
            .with_field("mainData", serde_json::Value::Null)
            .has_main_data()
    );
    assert!(
        !Task::new("t", "DataRequest")
            .with_field("mainData", json!(""))
            .has_main_data()
    );
    assert!(
        !Task::new("t", "DataRequest")
            .with_field("mainData", json!(false))
            .has_main_data()
    );
}

#[test]
fn test_task_deserializes_with_arbitrary_fields() {
    let task: Task = serde_json::from_value(json!({
        "id": "t1",
        "action": "SayMessage",
        "text": "Hi",
        "templateId": "tpl"
    }))
    .unwrap();

    assert_eq!(task.id, "t1");
    assert_eq!(task.action, "SayMessage");
    assert_eq!(
        serde_json::Value::Object(task.value_fields()),
        json!({ "action": "SayMessage", "text": "Hi" })
    );
}

#[test]
fn test_row_and_edge_helpers() {
    let plain = Row {
        id: "r1".to_string(),
        task_id: None,
    };
    let explicit = Row {
        id: "r2".to_string(),
        task_id: Some("t2".to_string()),
    };
    assert_eq!(plain.task_id(), "r1");
    assert_eq!(explicit.task_id(), "t2");

    assert!(else_edge("e", "a", "b").is_else());
    assert!(
        FlowEdge {
            label: Some(" Else ".to_string()),
            ..edge("e", "a", "b")
        }
        .is_else()
    );
    assert!(
        !FlowEdge {
            label: Some("Yes".to_string()),
            ..edge("e", "a", "b")
        }
        .is_else()
    );

    assert_eq!(node("N", &["x", "y"]).last_row_task_id(), Some("y"));
    assert_eq!(node("N", &[]).last_row_task_id(), None);
}

#[test]
fn test_step_type_parsing() {
    assert_eq!(StepType::parse("confirmation"), Some(StepType::Confirmation));
    assert_eq!(
        StepType::parse("success").map(StepType::retrieval_state),
        Some(RetrievalState::Confirmed)
    );
    assert_eq!(StepType::parse("Start"), None);
}
