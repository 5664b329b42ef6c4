use axum::{extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{errors::AppError, middleware::NormalizedBody};

/// Typed view of the body that the validation gate already accepted.
///
/// Reads the [`NormalizedBody`] extension, so defaults are applied and
/// unknown keys are gone. Only usable on routes behind `validate_body`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalized<T>(pub T);

impl<T, S> FromRequestParts<S> for Normalized<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let NormalizedBody(body) = parts
            .extensions
            .get::<NormalizedBody>()
            .cloned()
            .ok_or(AppError::MissingNormalizedBody)?;

        let inner = serde_json::from_value(Value::Object(body)).map_err(AppError::NormalizedBody)?;

        Ok(Normalized(inner))
    }
}
