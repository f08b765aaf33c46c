use axum::{
    extract::{FromRequestParts, Path, rejection::PathRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A `Path<T>` wrapper for id-like segments. A segment that does not parse
/// cannot name a stored row, so it is answered as `AppError::NotFound` in the
/// usual JSON envelope.
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: PathRejection| {
                tracing::debug!("Rejected path: {}", e.body_text());
                AppError::NotFound("Not found".to_string())
            })?;
        Ok(AppPath(value))
    }
}
