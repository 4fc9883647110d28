//! Loading of loosely typed JSON payloads into typed values. Every problem with
//! the payload is collected into a single [`ValidationError`] rather than
//! stopping at the first one.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::api::error::ValidationError;

pub const INVALID_INPUT_MESSAGE: &str = "Invalid input type.";
pub const UNKNOWN_FIELD_MESSAGE: &str = "Unknown field.";
pub const MISSING_FIELD_MESSAGE: &str = "Missing data for required field.";
pub const NULL_FIELD_MESSAGE: &str = "Field may not be null.";
pub const INVALID_INTEGER_MESSAGE: &str = "Not a valid integer.";
pub const INVALID_STRING_MESSAGE: &str = "Not a valid string.";
pub const INVALID_BOOLEAN_MESSAGE: &str = "Not a valid boolean.";
pub const INVALID_DATE_MESSAGE: &str = "Not a valid date.";

/// Turns a raw JSON value into a field value, or a message explaining why it can't
pub type Coerce<T> = fn(&Value) -> Result<T, &'static str>;

#[derive(Debug)]
pub struct Loader {
    object: Map<String, Value>,
    errors: ValidationError,
}

impl Loader {
    /// Fails immediately when the payload isn't an object. Keys not listed in
    /// `known` are reported when the loader finishes
    pub fn new(value: Value, known: &[&str]) -> Result<Self, ValidationError> {
        let Value::Object(object) = value else {
            return Err(ValidationError::single(
                ValidationError::SCHEMA_KEY,
                INVALID_INPUT_MESSAGE,
            ));
        };

        let mut errors = ValidationError::default();
        for key in object.keys() {
            if !known.contains(&key.as_str()) {
                errors.add(key.as_str(), UNKNOWN_FIELD_MESSAGE);
            }
        }

        Ok(Self { object, errors })
    }

    pub fn required<T>(&mut self, field: &str, coerce: Coerce<T>) -> Option<T> {
        match self.object.get(field) {
            None => {
                self.errors.add(field, MISSING_FIELD_MESSAGE);
                None
            },
            Some(Value::Null) => {
                self.errors.add(field, NULL_FIELD_MESSAGE);
                None
            },
            Some(value) => apply(&mut self.errors, field, value, coerce),
        }
    }

    /// Absent and `null` both load as `None`
    pub fn optional<T>(&mut self, field: &str, coerce: Coerce<T>) -> Option<T> {
        match self.object.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => apply(&mut self.errors, field, value, coerce),
        }
    }

    /// Absent loads as `default`. `null` is still rejected
    pub fn with_default<T>(&mut self, field: &str, default: T, coerce: Coerce<T>) -> T {
        match self.object.get(field) {
            None => default,
            Some(Value::Null) => {
                self.errors.add(field, NULL_FIELD_MESSAGE);
                default
            },
            Some(value) => apply(&mut self.errors, field, value, coerce).unwrap_or(default),
        }
    }

    /// Runs `validator` over a value that loaded. When it returns `None` the
    /// `message` is recorded against `field`
    pub fn validate<T, U, M>(
        &mut self,
        field: &str,
        value: Option<T>,
        validator: impl FnOnce(T) -> Option<U>,
        message: M,
    ) -> Option<U>
    where
        M: Into<String>,
    {
        let validated = validator(value?);
        if validated.is_none() {
            self.errors.add(field, message);
        }
        validated
    }

    pub fn error<M: Into<String>>(&mut self, field: &str, message: M) {
        self.errors.add(field, message);
    }

    /// Any recorded error wins over whatever `build` produces
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationError> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or(self.errors)
    }
}

fn apply<T>(
    errors: &mut ValidationError,
    field: &str,
    value: &Value,
    coerce: Coerce<T>,
) -> Option<T> {
    match coerce(value) {
        Ok(v) => Some(v),
        Err(message) => {
            errors.add(field, message);
            None
        },
    }
}

/// Whole JSON numbers or strings holding one. Booleans and fractions are refused
pub fn integer(value: &Value) -> Result<i64, &'static str> {
    match value {
        Value::Number(n) => n.as_i64().ok_or(INVALID_INTEGER_MESSAGE),
        Value::String(s) => s.trim().parse().map_err(|_| INVALID_INTEGER_MESSAGE),
        _ => Err(INVALID_INTEGER_MESSAGE),
    }
}

pub fn string(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(INVALID_STRING_MESSAGE),
    }
}

pub fn boolean(value: &Value) -> Result<bool, &'static str> {
    const TRUTHY: [&str; 6] = ["t", "true", "on", "y", "yes", "1"];
    const FALSY: [&str; 6] = ["f", "false", "off", "n", "no", "0"];

    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Ok(true),
            Some(f) if f == 0.0 => Ok(false),
            _ => Err(INVALID_BOOLEAN_MESSAGE),
        },
        Value::String(s) => {
            let s = s.to_lowercase();
            if TRUTHY.contains(&s.as_str()) {
                Ok(true)
            } else if FALSY.contains(&s.as_str()) {
                Ok(false)
            } else {
                Err(INVALID_BOOLEAN_MESSAGE)
            }
        },
        _ => Err(INVALID_BOOLEAN_MESSAGE),
    }
}

/// ISO 8601 calendar dates, `YYYY-MM-DD`
pub fn date(value: &Value) -> Result<NaiveDate, &'static str> {
    match value {
        Value::String(s) => s.parse().map_err(|_| INVALID_DATE_MESSAGE),
        _ => Err(INVALID_DATE_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_non_object_payload_is_a_schema_error() {
        for value in [json!([1, 2]), json!("name"), json!(3)] {
            let err = Loader::new(value, &["name"]).unwrap_err();
            assert_eq!(err.messages("_schema"), ["Invalid input type."]);
        }
    }

    #[test]
    fn test_errors_accumulate_across_fields() {
        let mut loader = Loader::new(json!({ "a": null, "id": 4 }), &["a", "b"]).unwrap();
        assert_eq!(loader.required("a", integer), None);
        assert_eq!(loader.required("b", integer), None);

        let err = loader.finish(|| Some(())).unwrap_err();
        assert_eq!(err.messages("a"), ["Field may not be null."]);
        assert_eq!(err.messages("b"), ["Missing data for required field."]);
        assert_eq!(err.messages("id"), ["Unknown field."]);
    }

    #[test]
    fn test_optional_and_default() {
        let mut loader = Loader::new(json!({ "a": null }), &["a", "b", "c"]).unwrap();
        assert_eq!(loader.optional("a", integer), None);
        assert_eq!(loader.optional("b", integer), None);
        assert!(loader.with_default("c", true, boolean));
        assert_eq!(loader.finish(|| Some(7)), Ok(7));
    }

    #[test]
    fn test_validate_records_message_on_failure() {
        let mut loader = Loader::new(json!({ "n": 0 }), &["n"]).unwrap();
        let n = loader.required("n", integer);
        let n = loader.validate("n", n, |n| (n >= 1).then_some(n), "At least 1.");
        assert_eq!(n, None);
        assert_eq!(loader.finish(|| n).unwrap_err().messages("n"), ["At least 1."]);
    }

    #[test]
    fn test_integer_coercion() {
        assert_eq!(integer(&json!(30)), Ok(30));
        assert_eq!(integer(&json!("30")), Ok(30));
        assert_eq!(integer(&json!(-2)), Ok(-2));
        assert_eq!(integer(&json!(30.5)), Err(INVALID_INTEGER_MESSAGE));
        assert_eq!(integer(&json!("thirty")), Err(INVALID_INTEGER_MESSAGE));
        assert_eq!(integer(&json!(true)), Err(INVALID_INTEGER_MESSAGE));
    }

    #[test]
    fn test_boolean_coercion() {
        assert_eq!(boolean(&json!(true)), Ok(true));
        assert_eq!(boolean(&json!("Yes")), Ok(true));
        assert_eq!(boolean(&json!(0)), Ok(false));
        assert_eq!(boolean(&json!("off")), Ok(false));
        assert_eq!(boolean(&json!("maybe")), Err(INVALID_BOOLEAN_MESSAGE));
        assert_eq!(boolean(&json!(2)), Err(INVALID_BOOLEAN_MESSAGE));
    }

    #[test]
    fn test_date_and_string_coercion() {
        assert_eq!(
            date(&json!("2024-01-15")),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(date(&json!("15/01/2024")), Err(INVALID_DATE_MESSAGE));
        assert_eq!(date(&json!("2024-02-30")), Err(INVALID_DATE_MESSAGE));
        assert_eq!(date(&json!(20240115)), Err(INVALID_DATE_MESSAGE));
        assert_eq!(string(&json!("x")), Ok("x".to_owned()));
        assert_eq!(string(&json!(1)), Err(INVALID_STRING_MESSAGE));
    }
}
