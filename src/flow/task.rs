use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Store bookkeeping fields that never reach the runtime.
const STRIPPED_FIELDS: [&str; 4] = ["id", "templateId", "createdAt", "updatedAt"];

/// A task as held by the external task store.
///
/// Only `id` and `action` are interpreted by the compiler; every other field is
/// carried through to the compiled output untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub action: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Task {
    pub fn new(id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action: action.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// The nested dialogue payload, if any.
    pub fn main_data(&self) -> Option<&Value> {
        self.fields.get("mainData")
    }

    /// Whether this task carries a non-empty `mainData`, i.e. drives a dialogue template.
    pub fn has_main_data(&self) -> bool {
        match self.main_data() {
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::String(text)) => !text.trim().is_empty(),
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Null) | None => false,
            Some(Value::Number(_)) => true,
        }
    }

    /// The flattened value handed to the runtime: every task field except store bookkeeping.
    pub fn value_fields(&self) -> Map<String, Value> {
        let mut value = Map::new();
        value.insert("action".to_string(), Value::String(self.action.clone()));
        for (key, field) in &self.fields {
            if !STRIPPED_FIELDS.contains(&key.as_str()) {
                value.insert(key.clone(), field.clone());
            }
        }
        value
    }
}
