use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod fields;

mod exercise;
pub use exercise::*;

mod workout;
pub use workout::*;

mod workout_exercise;
pub use workout_exercise::*;

/// Bodies that count as "nothing sent": `null`, `false`, `0`, `""`, `[]` and `{}`
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Body of responses that only confirm an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self { message: message.into() }
    }
}
