use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use shared::api::error::{Nothing, ServerError};
use tracing::debug;

/// Like [`Path`] but a segment that doesn't deserialize (`/workouts/abc`) is a
/// plain 404 instead of a 400
#[derive(Debug)]
pub struct IdPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ServerError<Nothing>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(ids) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                debug!(%rejection, "Path parameters did not match");
                ServerError::NotFound
            })?;
        Ok(IdPath(ids))
    }
}
