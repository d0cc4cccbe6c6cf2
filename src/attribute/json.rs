use super::{AttributeValue, Document};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{Map, Number, Value};

impl AttributeValue {
    /// Render this value as JSON for inspection.
    ///
    /// The rendering is lossy: binaries become standard base64 strings and sets become
    /// arrays. Numbers that do not fit a JSON number are rendered as strings.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Number(n) => number_to_json(n),
            Self::Bool(b) => Value::Bool(*b),
            Self::Binary(b) => Value::String(STANDARD.encode(b)),
            Self::Null => Value::Null,
            Self::List(list) => Value::Array(list.iter().map(Self::to_json).collect()),
            Self::Map(map) => document_to_json(map),
            Self::StringSet(set) => set.iter().cloned().map(Value::String).collect(),
            Self::NumberSet(set) => set.iter().map(|n| number_to_json(n)).collect(),
            Self::BinarySet(set) => set
                .iter()
                .map(|b| Value::String(STANDARD.encode(b)))
                .collect(),
        }
    }
}

/// Render a whole document as a JSON object, see [`AttributeValue::to_json`].
pub fn document_to_json(document: &Document) -> Value {
    Value::Object(
        document
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect::<Map<_, _>>(),
    )
}

fn number_to_json(n: &str) -> Value {
    n.parse::<Number>()
        .map(Value::Number)
        .unwrap_or_else(|_| Value::String(n.to_string()))
}
