//! Event payloads and their field values.

use serde::Serialize;
use std::fmt;

/// Priority value carried by every malformed payload. It is never numeric.
pub const MALFORMED_PRIORITY: &str = "You-wont-parse-me";

/// Number of distinct priorities a regular event cycles through.
const PRIORITY_LEVELS: u64 = 10;

/// A single field value as it is sent to the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Int(i64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{i}"),
        }
    }
}

/// The field mapping appended as one stream entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    /// Well-formed event: `{kind: "Event <i>", priority: i mod 10}`.
    Regular { kind: String, priority: u8 },
    /// Schema-violating event: only a `priority` field holding text.
    Malformed,
}

impl EventPayload {
    /// Build the regular payload for the zero-based iteration `index`.
    pub fn regular(index: u64) -> Self {
        EventPayload::Regular {
            kind: format!("Event {index}"),
            priority: (index % PRIORITY_LEVELS) as u8,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, EventPayload::Malformed)
    }

    /// Ordered `(name, value)` pairs for this payload.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        match self {
            EventPayload::Regular { kind, priority } => vec![
                ("kind", FieldValue::Text(kind.clone())),
                ("priority", FieldValue::Int(i64::from(*priority))),
            ],
            EventPayload::Malformed => vec![(
                "priority",
                FieldValue::Text(MALFORMED_PRIORITY.to_string()),
            )],
        }
    }

    /// Look up a single field by name.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Render the payload as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
            .collect();
        serde_json::Value::Object(map)
    }
}
