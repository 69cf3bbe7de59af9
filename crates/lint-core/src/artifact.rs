//! The shared configuration artifact and its merge contract.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The progressively-merged configuration object produced by the pipeline.
///
/// Each phase receives the accumulated artifact and returns it, usually the
/// same object mutated in place. No component owns any field exclusively:
/// merge semantics are field-by-field last-writer-wins, with nested objects
/// merged recursively and arrays concatenated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigArtifact(Map<String, Value>);

impl ConfigArtifact {
    /// Create an empty artifact.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON object. Returns `None` for any other value kind.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Read a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Mutable access to a top-level field.
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.0.get_mut(field)
    }

    /// Whether the artifact holds no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrite `field` with `value`, replacing whatever was there.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Merge `value` into `field` under the artifact merge contract.
    pub fn merge_field(&mut self, field: impl Into<String>, value: Value) {
        let field = field.into();
        match self.0.get_mut(&field) {
            Some(existing) => merge_value(existing, value),
            None => {
                self.0.insert(field, value);
            }
        }
    }

    /// Append `items` to the array at `field`, creating the array if the
    /// field is absent. A non-array value already in the field is replaced.
    pub fn push_items<I>(&mut self, field: impl Into<String>, items: I)
    where
        I: IntoIterator<Item = Value>,
    {
        let entry = self
            .0
            .entry(field.into())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !entry.is_array() {
            *entry = Value::Array(Vec::new());
        }
        if let Value::Array(array) = entry {
            array.extend(items);
        }
    }

    /// Merge `other` on top of this artifact: `other`'s fields win on
    /// conflict, arrays from both sides are concatenated.
    pub fn merge(&mut self, other: ConfigArtifact) {
        for (field, value) in other.0 {
            self.merge_field(field, value);
        }
    }

    /// Consume the artifact into a plain JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Merge `incoming` into `target`: objects recurse, arrays concatenate,
/// everything else is last-writer-wins.
fn merge_value(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => merge_value(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(existing), Value::Array(incoming)) => existing.extend(incoming),
        (slot, incoming) => *slot = incoming,
    }
}
