use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::fmt;
use thiserror::Error;
use validator::ValidationErrors;

/// How a missing beer was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeerKey {
    Id(i64),
    Name(String),
}

impl fmt::Display for BeerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeerKey::Id(id) => write!(f, "ID {}", id),
            BeerKey::Name(name) => write!(f, "name {}", name),
        }
    }
}

#[derive(Debug, Error)]
pub enum BeerError {
    #[error("Beer with name {0} already registered in the system.")]
    AlreadyExists(String),

    #[error("Beer not found with {0}")]
    NotFound(BeerKey),

    /// `quantity` is the requested adjustment, not the resulting stock
    #[error("Beer with ID {id} cannot be adjusted by {quantity}: stock would leave 0..=max")]
    StockExceeded { id: i64, quantity: i32 },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BeerResult<T> = Result<T, BeerError>;

impl BeerError {
    pub fn not_found_id(id: i64) -> Self {
        BeerError::NotFound(BeerKey::Id(id))
    }

    pub fn not_found_name(name: impl Into<String>) -> Self {
        BeerError::NotFound(BeerKey::Name(name.into()))
    }
}

/// Convert BeerError to AppError for standardized error responses
impl From<BeerError> for AppError {
    fn from(err: BeerError) -> Self {
        let message = err.to_string();
        match err {
            BeerError::AlreadyExists(_) => AppError::Conflict(message),
            BeerError::NotFound(_) => AppError::NotFound(message),
            BeerError::StockExceeded { .. } => AppError::StockExceeded(message),
            BeerError::Validation(errors) => AppError::ValidationError(errors),
            BeerError::Database(_) | BeerError::Internal(_) => {
                AppError::InternalServerError(message)
            }
        }
    }
}

impl IntoResponse for BeerError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<sea_orm::DbErr> for BeerError {
    fn from(err: sea_orm::DbErr) -> Self {
        BeerError::Database(err.to_string())
    }
}
