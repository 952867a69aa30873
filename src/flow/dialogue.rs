/// An assembled dialogue template ("DDT"), as returned by the template cache.
#[derive(Debug, Clone, Default)]
pub struct AssembledDdt {
    pub id: String,
    pub main_data: Option<DdtMainData>,
}

/// The primary data item of a dialogue template.
#[derive(Debug, Clone, Default)]
pub struct DdtMainData {
    /// `None` when the template declares no steps at all.
    pub steps: Option<Vec<DdtStep>>,
}

/// One step of a dialogue, e.g. `start` or `noMatch`, with its ordered retry attempts.
#[derive(Debug, Clone)]
pub struct DdtStep {
    pub step_type: String,
    pub escalations: Vec<Escalation>,
}

/// One retry attempt inside a step.
#[derive(Debug, Clone, Default)]
pub struct Escalation {
    pub id: Option<String>,
    pub tasks: Vec<TaskRef>,
}

/// A reference from an escalation to a task in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRef {
    /// `None` when the upstream record carried none of the known id fields.
    pub id: Option<String>,
}

impl TaskRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }
}

impl AssembledDdt {
    pub fn steps(&self) -> Option<&[DdtStep]> {
        self.main_data.as_ref()?.steps.as_deref()
    }
}
