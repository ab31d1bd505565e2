//! Integer id path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extractor for a single `i64` path parameter.
///
/// The parameter name does not matter, which lets `/{key}` routes be shared
/// between name lookups and id-based operations.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::delete;
/// use axum_helpers::extractors::IdPath;
///
/// async fn delete_beer(IdPath(id): IdPath) -> String {
///     format!("Beer ID: {}", id)
/// }
///
/// let app = Router::new().route("/beers/{id}", delete(delete_beer));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        raw.parse::<i64>()
            .map(IdPath)
            .map_err(|_| AppError::InvalidId(raw).into_response())
    }
}
