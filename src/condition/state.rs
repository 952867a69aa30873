use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution state of a compiled task, owned and mutated by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExecutionState {
    #[default]
    UnExecuted,
    Executed,
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionState::UnExecuted => write!(f, "unexecuted"),
            ExecutionState::Executed => write!(f, "executed"),
        }
    }
}

/// Data-collection progress of a dialogue template instance, tracked by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RetrievalState {
    Empty,
    AsrNoMatch,
    AsrNoInput,
    Saturated,
    Confirmed,
}

impl fmt::Display for RetrievalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RetrievalState::Empty => "empty",
            RetrievalState::AsrNoMatch => "asrNoMatch",
            RetrievalState::AsrNoInput => "asrNoInput",
            RetrievalState::Saturated => "saturated",
            RetrievalState::Confirmed => "confirmed",
        };
        write!(f, "{}", name)
    }
}

/// The kinds of step a dialogue template can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepType {
    Start,
    NoMatch,
    NoInput,
    Confirmation,
    Success,
}

impl StepType {
    /// Parses the wire name of a step type. Returns `None` for anything unrecognized.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "start" => Some(StepType::Start),
            "noMatch" => Some(StepType::NoMatch),
            "noInput" => Some(StepType::NoInput),
            "confirmation" => Some(StepType::Confirmation),
            "success" => Some(StepType::Success),
            _ => None,
        }
    }

    /// The retrieval state in which this step becomes relevant.
    pub fn retrieval_state(self) -> RetrievalState {
        match self {
            StepType::Start => RetrievalState::Empty,
            StepType::NoMatch => RetrievalState::AsrNoMatch,
            StepType::NoInput => RetrievalState::AsrNoInput,
            StepType::Confirmation => RetrievalState::Saturated,
            StepType::Success => RetrievalState::Confirmed,
        }
    }
}
