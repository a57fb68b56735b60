//! Centralized error types for the Ember admin services.
//!
//! Uses `thiserror` for ergonomic error definitions and provides HTTP-friendly
//! error variants that can be directly converted to API responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Application error type used across the admin and moderation services.
///
/// Every failure a caller can observe is a distinct variant; nothing is
/// swallowed. Partial success in a role edit (adds applied, removes failed)
/// surfaces as [`AdminError::RoleRemoveFailed`], not a generic failure, so the
/// caller can report the precise state.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    // === Auth errors ===
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing capability: {capability}")]
    MissingCapability { capability: String },

    // === Resource errors ===
    #[error("Account not found")]
    AccountNotFound,

    #[error("Photo not found")]
    PhotoNotFound,

    // === Role edit errors ===
    #[error("Failed to add to roles: {reason}")]
    RoleAddFailed { reason: String },

    /// The add step already ran and its effects remain in place.
    #[error("Failed to remove the roles: {reason}")]
    RoleRemoveFailed { reason: String },

    // === Moderation errors ===
    /// Asset-store deletion failed or timed out; the photo record was left
    /// untouched and can be rejected again once the store is reachable.
    #[error("Failed to delete photo from object storage: {reason}")]
    AssetDeletionFailed { reason: String },

    // === Validation errors ===
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // === Infrastructure errors ===
    #[error("Persistence layer unavailable")]
    StoreUnavailable,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body sent to clients.
#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    error: String,
    message: String,
}

impl AdminError {
    /// Map error to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::MissingCapability { .. } => StatusCode::FORBIDDEN,
            Self::AccountNotFound | Self::PhotoNotFound => StatusCode::NOT_FOUND,
            Self::RoleAddFailed { .. } | Self::RoleRemoveFailed { .. } => StatusCode::BAD_REQUEST,
            Self::AssetDeletionFailed { .. } => StatusCode::BAD_GATEWAY,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable | Self::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error code string for programmatic handling by clients.
    pub fn error_code(&self) -> &str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::MissingCapability { .. } => "MISSING_CAPABILITY",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::PhotoNotFound => "PHOTO_NOT_FOUND",
            Self::RoleAddFailed { .. } => "ROLE_ADD_FAILED",
            Self::RoleRemoveFailed { .. } => "ROLE_REMOVE_FAILED",
            Self::AssetDeletionFailed { .. } => "ASSET_DELETION_FAILED",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::StoreUnavailable | Self::Database(_) => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't leak internal details to clients
        let message = match &self {
            AdminError::Database(e) => {
                tracing::error!("Database error: {e}");
                "The persistence layer is currently unavailable".to_string()
            }
            AdminError::Internal(e) => {
                tracing::error!("Internal error: {e}");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            error: self.error_code().to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience type alias for Results using AdminError.
pub type AdminResult<T> = Result<T, AdminError>;
