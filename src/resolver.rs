use crate::flow::{AssembledDdt, Task};
use ahash::AHashMap;
use std::marker::PhantomData;

/// Synchronous lookup of tasks and dialogue templates by id.
///
/// The compiler never fetches anything itself: any asynchronous loading must have
/// populated the backing cache before a compilation pass starts.
pub trait TaskResolver {
    fn get_task(&self, id: &str) -> Option<&Task>;

    /// Dialogue template driven by the task with the given id, if one is assembled.
    fn get_ddt(&self, task_id: &str) -> Option<&AssembledDdt>;
}

/// An owned, in-memory task and template cache.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    tasks: AHashMap<String, Task>,
    ddts: AHashMap<String, AssembledDdt>,
}

impl TaskCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_task(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    /// Registers the dialogue template driven by `task_id`.
    pub fn insert_ddt(&mut self, task_id: impl Into<String>, ddt: AssembledDdt) {
        self.ddts.insert(task_id.into(), ddt);
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.insert_task(task);
        self
    }

    pub fn with_ddt(mut self, task_id: impl Into<String>, ddt: AssembledDdt) -> Self {
        self.insert_ddt(task_id, ddt);
        self
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn ddt_count(&self) -> usize {
        self.ddts.len()
    }
}

impl TaskResolver for TaskCatalog {
    fn get_task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    fn get_ddt(&self, task_id: &str) -> Option<&AssembledDdt> {
        self.ddts.get(task_id)
    }
}

/// Adapts a pair of lookup closures into a `TaskResolver`.
pub struct FnResolver<'a, T, D> {
    get_task: T,
    get_ddt: D,
    _lookups: PhantomData<&'a ()>,
}

impl<'a, T, D> FnResolver<'a, T, D>
where
    T: Fn(&str) -> Option<&'a Task>,
    D: Fn(&str) -> Option<&'a AssembledDdt>,
{
    pub fn new(get_task: T, get_ddt: D) -> Self {
        Self {
            get_task,
            get_ddt,
            _lookups: PhantomData,
        }
    }
}

impl<'a, T, D> TaskResolver for FnResolver<'a, T, D>
where
    T: Fn(&str) -> Option<&'a Task>,
    D: Fn(&str) -> Option<&'a AssembledDdt>,
{
    fn get_task(&self, id: &str) -> Option<&Task> {
        (self.get_task)(id)
    }

    fn get_ddt(&self, task_id: &str) -> Option<&AssembledDdt> {
        (self.get_ddt)(task_id)
    }
}
