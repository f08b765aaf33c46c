use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A `Json<T>` wrapper that turns body rejections (missing fields, wrong
/// types, bad content type) into `AppError::BadRequest`, so the client
/// always receives the `{ success: false, message }` envelope.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| {
                tracing::debug!("Rejected JSON body: {}", e.body_text());
                AppError::BadRequest("Invalid request".to_string())
            })?;
        Ok(AppJson(value))
    }
}
