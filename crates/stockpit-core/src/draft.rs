// ── Form draft ──
//
// In-progress, unsaved field values for a create/edit operation.
// Seeded empty (create) or from the selected entity (edit); discarded
// on dialog close; never partially persisted.

use serde::Serialize;
use serde_json::{Map, Value};

/// Mutable mapping from field name to string/number input, doubling as
/// the JSON body for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormDraft {
    fields: Map<String, Value>,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to any JSON-representable value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Field value as text, if it is a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Field value as a number. Numeric strings parse too, since form
    /// inputs arrive as text.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.fields.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The request body view.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}
