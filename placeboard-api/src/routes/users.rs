/// User endpoints
///
/// # Endpoints
///
/// - `GET /api/users` - List all users
/// - `POST /api/users/signup` - Create an account
/// - `POST /api/users/login` - Verify credentials
///
/// Responses never include the stored password hash; users are projected
/// into `UserDto`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use placeboard_shared::auth::password;
use placeboard_shared::models::user::{CreateUser, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Fallback avatar for accounts created without an image URL
const DEFAULT_USER_IMAGE: &str =
    "https://cdn.pixabay.com/photo/2015/04/23/22/00/tree-736885__480.jpg";

/// User representation returned to clients (no password hash)
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDto {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Avatar URL
    pub image: String,

    /// Ids of the places this user created
    pub places: Vec<Uuid>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image_url,
            places: user.place_ids,
        }
    }
}

/// User-list response body
#[derive(Debug, Serialize, Deserialize)]
pub struct UsersResponse {
    /// All users
    pub users: Vec<UserDto>,
}

/// Single-user response body
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// The user
    pub user: UserDto,
}

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (hashed before storage)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Optional avatar URL
    pub image: Option<String>,
}

/// Login request
///
/// Not validated beyond shape: a malformed email simply fails the
/// credential lookup, so login only ever answers 200 or 401.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Acknowledgement message
    pub message: String,

    /// Id of the authenticated user
    pub user_id: Uuid,
}

/// List all users
///
/// # Errors
///
/// - `500 Internal Server Error`: store failure
pub async fn get_users(State(state): State<AppState>) -> ApiResult<Json<UsersResponse>> {
    let users = User::list(&state.db).await?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

/// Create an account
///
/// The password is hashed with Argon2id before it reaches the store. A
/// duplicate email surfaces through the store's unique index as a 422.
///
/// # Endpoint
///
/// ```text
/// POST /api/users/signup
/// Content-Type: application/json
///
/// {
///   "name": "Max Schwarz",
///   "email": "max@example.com",
///   "password": "secret6"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed, or email already exists
/// - `500 Internal Server Error`: store failure
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
            image_url: req.image.unwrap_or_else(|| DEFAULT_USER_IMAGE.to_string()),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user: user.into() })))
}

/// Verify credentials
///
/// Looks the user up by email and verifies the password against the stored
/// hash. Unknown email and wrong password answer identically.
///
/// # Errors
///
/// - `401 Unauthorized`: invalid credentials
/// - `500 Internal Server Error`: store failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| {
            ApiError::Unauthorized("Invalid credentials, could not log you in.".to_string())
        })?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid credentials, could not log you in.".to_string(),
        ));
    }

    Ok(Json(LoginResponse {
        message: "Logged in!".to_string(),
        user_id: user.id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_user_dto_omits_password_hash() {
        let user = User {
            id: Uuid::nil(),
            name: "Test".to_string(),
            email: "t@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            image_url: "img".to_string(),
            place_ids: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let dto: UserDto = user.into();
        let json = serde_json::to_string(&dto).unwrap();

        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
        assert!(json.contains("t@example.com"));
    }

    #[test]
    fn test_signup_request_validation() {
        let req = SignupRequest {
            name: "Max".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            image: None,
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("name"));
    }
}
