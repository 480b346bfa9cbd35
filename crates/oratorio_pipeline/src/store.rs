//! Run-scoped result store.

use crate::step::TRIGGER_KEY;
use serde_json::Value;
use std::collections::HashMap;

/// Mapping from step name (plus the reserved `"trigger"` key) to that step's
/// output value.
///
/// Append-only for the duration of a run: a step's output becomes visible
/// only after the step completes successfully, and keys are never replaced.
/// Key uniqueness is enforced at registration time, so inserts here cannot
/// collide. The store is dropped with the run.
#[derive(Debug, Default)]
pub struct ResultStore {
    values: HashMap<String, Value>,
}

impl ResultStore {
    /// Create a store seeded with the (already validated) trigger payload.
    pub(crate) fn seeded(trigger: Value) -> Self {
        let mut values = HashMap::new();
        values.insert(TRIGGER_KEY.to_string(), trigger);
        Self { values }
    }

    /// Read a completed entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Whether an entry has been published.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Publish a step's output.
    pub(crate) fn insert(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}
