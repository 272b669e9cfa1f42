use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Item not found: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Failed to read item store: {0}")]
    StorageRead(String),

    #[error("Failed to write item store: {0}")]
    StorageWrite(String),

    #[error("Statistics have not been computed yet")]
    StatsUnavailable,
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for `{message}` error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => AppError::NotFound("Item not found".to_string()),
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::StorageRead(msg) => AppError::InternalServerError(msg),
            CatalogError::StorageWrite(msg) => AppError::InternalServerError(msg),
            CatalogError::StatsUnavailable => {
                AppError::InternalServerError("Statistics have not been computed yet".to_string())
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
