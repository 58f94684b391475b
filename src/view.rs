//! Per-request view mapping consumed by the template renderer.

use serde::Serialize;
use serde_json::{Map, Value};

/// String-keyed output mapping for one request.
///
/// Created fresh per request, populated by exactly one action invocation,
/// rendered, then discarded. Insertion order is irrelevant.
#[derive(Debug, Clone, Default)]
pub struct View {
    entries: Map<String, Value>,
}

impl View {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes `value` and stores it under `key`.
    pub fn put(
        &mut self,
        key: impl Into<String>,
        value: impl Serialize,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.entries.insert(key.into(), value);
        Ok(())
    }

    /// Looks up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Resolves a dotted path such as `state.cells.0.1`, descending through
    /// objects by key and arrays by index.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.entries.get(parts.next()?)?;
        for part in parts {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the view holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
