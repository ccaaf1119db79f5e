/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>`, which converts to the
/// appropriate status code with a `{"message": ...}` JSON body. This is the
/// single boundary responder: precondition failures carry their specific
/// class (404/401/422), store failures during transactional writes surface
/// as 500 after the transaction has rolled back.
///
/// # Example
///
/// ```ignore
/// use placeboard_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::json;
///
/// async fn handler() -> ApiResult<Json<serde_json::Value>> {
///     let data = fetch_data().await?;
///     Ok(Json(json!({ "data": data })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use placeboard_shared::auth::password::PasswordError;
use placeboard_shared::geocode::GeocodeError;
use placeboard_shared::repo::PlaceRepoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Unauthorized (401) - bad credentials
    Unauthorized(String),

    /// Not found (404) - missing entity or unmatched route
    NotFound(String),

    /// Unprocessable entity (422) - field-level validation errors
    Validation(Vec<ValidationErrorDetail>),

    /// Unprocessable entity (422) - semantic rejection with a single message
    /// (duplicate email, un-geocodable address)
    Unprocessable(String),

    /// Internal server error (500)
    Internal(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
///
/// The wire contract is a bare message; internal detail is logged, not sent.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Validation(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Unprocessable(msg) => write!(f, "Unprocessable: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Validation(errors) => {
                let fields = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("Invalid inputs passed, please check your data. ({})", fields),
                )
            }
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unknown error occurred!".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Duplicate email surfaces through the unique index
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Unprocessable(
                            "User exists already, please login instead.".to_string(),
                        );
                    }
                }

                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert place repository errors to API errors
///
/// Precondition failures keep their NotFound class; anything that failed
/// inside the transactional sequence (already rolled back) becomes Internal.
impl From<PlaceRepoError> for ApiError {
    fn from(err: PlaceRepoError) -> Self {
        match err {
            PlaceRepoError::CreatorNotFound(id) => {
                ApiError::NotFound(format!("Could not find user for provided id: {}", id))
            }
            PlaceRepoError::PlaceNotFound(id) => {
                ApiError::NotFound(format!("Could not find a place with id: {}", id))
            }
            PlaceRepoError::Database(e) => {
                ApiError::Internal(format!("Database error: {}", e))
            }
        }
    }
}

/// Convert geocoding errors to API errors
impl From<GeocodeError> for ApiError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NoResults => ApiError::Unprocessable(err.to_string()),
            GeocodeError::RequestFailed(msg) | GeocodeError::InvalidResponse(msg) => {
                ApiError::Internal(format!("Geocoding failed: {}", msg))
            }
        }
    }
}

/// Convert password hashing errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert validator errors to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        let errors: Vec<ValidationErrorDetail> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_display() {
        let err = ApiError::Unauthorized("Invalid credentials".to_string());
        assert_eq!(err.to_string(), "Unauthorized: Invalid credentials");

        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_validation_error() {
        let errors = vec![
            ValidationErrorDetail {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            },
            ValidationErrorDetail {
                field: "password".to_string(),
                message: "Password too short".to_string(),
            },
        ];

        let err = ApiError::Validation(errors);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }

    #[test]
    fn test_repo_error_mapping() {
        let id = Uuid::nil();

        let err: ApiError = PlaceRepoError::CreatorNotFound(id).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = PlaceRepoError::PlaceNotFound(id).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = PlaceRepoError::Database(sqlx::Error::PoolClosed).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_geocode_error_mapping() {
        let err: ApiError = GeocodeError::NoResults.into();
        assert!(matches!(err, ApiError::Unprocessable(_)));

        let err: ApiError = GeocodeError::RequestFailed("timeout".to_string()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
