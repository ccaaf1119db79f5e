/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `places`: Place CRUD endpoints
/// - `users`: User listing, signup, and login endpoints

pub mod health;
pub mod places;
pub mod users;

use crate::error::ApiError;

/// Catch-all handler for unmatched routes
///
/// Mirrors the API's error contract: a 404 with a fixed JSON message body.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Could not find this route.".to_string())
}
