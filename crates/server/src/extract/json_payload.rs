use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{json, Value};
use shared::api::{
    error::{Nothing, ServerError},
    payloads::is_empty_payload,
};
use tracing::debug;

/// The raw request body. Decoding is deferred so a handler can decide when a
/// missing or malformed body matters
#[derive(Debug, Clone, Default)]
pub struct JsonPayload(pub Bytes);

impl JsonPayload {
    /// `Ok(None)` for bodies that carry nothing: no bytes at all, or a falsy
    /// JSON value such as `{}` or `null`
    pub fn decode<T>(&self) -> Result<Option<Value>, ServerError<T>> {
        if self.0.is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_slice(&self.0).map_err(|e| {
            debug!(%e, "Request body is not JSON");
            ServerError::bad_request(ServerError::<T>::BAD_JSON_MESSAGE)
        })?;

        Ok((!is_empty_payload(&value)).then_some(value))
    }

    /// For routes where the body is mandatory
    pub fn required<T>(&self) -> Result<Value, ServerError<T>> {
        self.decode::<T>()?
            .ok_or_else(|| ServerError::bad_request(ServerError::<T>::NO_INPUT_MESSAGE))
    }

    /// For routes where every field is optional, nothing sent loads as `{}`
    pub fn or_empty_object<T>(&self) -> Result<Value, ServerError<T>> {
        Ok(self.decode::<T>()?.unwrap_or_else(|| json!({})))
    }
}

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ServerError<Nothing>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::bad_request(rejection.body_text()))?;
        Ok(JsonPayload(bytes))
    }
}
