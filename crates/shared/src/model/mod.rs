use thiserror::Error;

pub mod constants;

mod category;
pub use category::*;

mod exercise;
pub use exercise::*;

mod workout;
pub use workout::*;

mod workout_exercise;
pub use workout_exercise::*;

#[cfg(feature = "backend")]
mod sqlite;
#[cfg(feature = "backend")]
pub use sqlite::*;

/// Invariant checks a model runs before it is written
pub trait ValidateModel {
    fn validate(&self) -> Result<(), ModelValidationError>;
}

/// A value a model refused to hold
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ModelValidationError {
    pub message: String,
}

impl ModelValidationError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self { message: message.into() }
    }
}

/// Shared check for the optional counters. `None` is always fine
pub fn validate_positive(
    value: Option<i64>,
    message: &str,
) -> Result<Option<i64>, ModelValidationError> {
    match value {
        Some(v) if v < 1 => Err(ModelValidationError::new(message)),
        v => Ok(v),
    }
}
