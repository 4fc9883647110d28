use std::{collections::BTreeMap, fmt};

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::model::ModelValidationError;

#[cfg(feature = "backend")]
pub use backend::*;

/// Error type for routes that have no failure modes of their own
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nothing {}

impl fmt::Display for Nothing {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for Nothing {}

/// Field name to messages, as produced by loading a payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationError {
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    /// Key used for errors that are about the payload as a whole
    pub const SCHEMA_KEY: &'static str = "_schema";

    pub fn add<F: Into<String>, M: Into<String>>(&mut self, field: F, message: M) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    pub fn single<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        let mut error = Self::default();
        error.add(field, message);
        error
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug)]
pub enum ServerError<T> {
    /// A route specific error, see [`crate::api::response_errors`]
    Inner { code: StatusCode, inner: T },
    /// The payload didn't pass schema validation
    Validation { inner: ValidationError },
    /// A model refused a value
    Model { inner: ModelValidationError },
    BadRequest { message: String },
    /// Path parameters that don't address any resource
    NotFound,
    /// Anything unexpected. The message is logged but never sent to the client
    Other { message: String },
}

impl<T> ServerError<T> {
    pub const NO_INPUT_MESSAGE: &'static str = "No input data provided.";
    pub const BAD_JSON_MESSAGE: &'static str = "Failed to decode JSON object.";

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest { message: message.into() }
    }

    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other { message: message.into() }
    }

    pub fn code(&self) -> StatusCode {
        match self {
            Self::Inner { code, .. } => *code,
            Self::Validation { .. } | Self::Model { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inner { code, inner } => write!(f, "{code}: {inner}"),
            Self::Validation { inner } => write!(f, "Validation failed: {inner}"),
            Self::Model { inner } => write!(f, "Invalid model: {inner}"),
            Self::BadRequest { message } => write!(f, "Bad request: {message}"),
            Self::NotFound => write!(f, "Not found"),
            Self::Other { message } => write!(f, "Other: {message}"),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> std::error::Error for ServerError<T> {}

/// Builds a [`ServerError::Other`] from format args
#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other { message: format!($($arg)*) }
    };
}

impl<T> From<ValidationError> for ServerError<T> {
    fn from(inner: ValidationError) -> Self {
        Self::Validation { inner }
    }
}

impl<T> From<ModelValidationError> for ServerError<T> {
    fn from(inner: ModelValidationError) -> Self {
        Self::Model { inner }
    }
}

#[cfg(feature = "backend")]
mod backend {
    use axum::{
        response::{IntoResponse, Response},
        Json,
    };
    use deadpool_sqlite::{InteractError, PoolError};
    use serde_json::json;
    use tracing::error;

    use super::ServerError;
    use crate::model::ModelError;

    impl<T> From<rusqlite::Error> for ServerError<T> {
        #[track_caller]
        fn from(err: rusqlite::Error) -> Self {
            Self::other(format!("rusqlite: {err:?}"))
        }
    }

    impl<T> From<InteractError> for ServerError<T> {
        fn from(err: InteractError) -> Self {
            Self::other(format!("deadpool interact: {err:?}"))
        }
    }

    impl<T> From<PoolError> for ServerError<T> {
        fn from(err: PoolError) -> Self {
            Self::other(format!("deadpool pool: {err:?}"))
        }
    }

    impl<T> From<ModelError> for ServerError<T> {
        fn from(err: ModelError) -> Self {
            match err {
                ModelError::Invalid(inner) => Self::Model { inner },
                // Routes that can hit a constraint map it to their own conflict error
                // before it gets here
                ModelError::Duplicate(e) => Self::other(format!("unhandled constraint: {e:?}")),
                ModelError::Database(e) => e.into(),
            }
        }
    }

    impl<T: std::fmt::Display> IntoResponse for ServerError<T> {
        fn into_response(self) -> Response {
            let code = self.code();
            let body = match self {
                ServerError::Inner { inner, .. } => json!({ "error": inner.to_string() }),
                ServerError::Validation { inner } => json!({ "errors": inner }),
                ServerError::Model { inner } => json!({ "error": inner.message }),
                ServerError::BadRequest { message } => json!({ "error": message }),
                ServerError::NotFound => json!({ "error": "Not found." }),
                ServerError::Other { message } => {
                    error!(%message, "Request failed");
                    json!({ "error": "Internal server error." })
                },
            };

            (code, Json(body)).into_response()
        }
    }
}
