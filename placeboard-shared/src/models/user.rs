/// User model and database operations
///
/// Users own zero or more places. The `place_ids` column mirrors
/// `places.creator`: every id in the array references a place whose creator
/// is this user, and every place created by this user appears in the array.
/// Both sides of that reference are only ever written together by the
/// transactional repository (`crate::repo::places`).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email CITEXT NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     image_url VARCHAR(512) NOT NULL,
///     place_ids UUID[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use placeboard_shared::models::user::{CreateUser, User};
/// use placeboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         name: "Max Schwarz".to_string(),
///         email: "max@example.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         image_url: "https://example.com/avatar.png".to_string(),
///     },
/// )
/// .await?;
/// println!("Created user: {}", user.id);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::place::Place;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, image_url, place_ids, created_at, updated_at";

/// User model representing an account record
///
/// Passwords are stored as Argon2id hashes, never in plaintext. API response
/// types must not serialize `password_hash`; handlers project into their own
/// DTOs.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name (non-empty)
    pub name: String,

    /// Email address (case-insensitive via CITEXT)
    ///
    /// Must be unique across all users
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Avatar/profile picture URL
    pub image_url: String,

    /// Ids of the places this user created
    ///
    /// Mirror of `places.creator`; mutated only inside the place
    /// repository's transactions
    pub place_ids: Vec<Uuid>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address (stored case-insensitively)
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    /// Avatar URL
    pub image_url: String,
}

impl User {
    /// Creates a new user with an empty place list
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, image_url, place_ids,
                      created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.image_url)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// Returns the user if found, None otherwise.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Email lookup is case-insensitive (via CITEXT column type).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Resolves a user together with its place documents in one call
    ///
    /// This is the "populate"-style lookup: the returned places are the rows
    /// referenced by the user's `place_ids` list, resolved through
    /// `places.creator` (the two are equivalent by invariant).
    ///
    /// Returns `None` if no user with that id exists.
    pub async fn find_with_places(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<(Self, Vec<Place>)>, sqlx::Error> {
        let Some(user) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let places = Place::find_by_creator(pool, id).await?;

        Ok(Some((user, places)))
    }

    /// Lists all users, ordered by creation date (newest first)
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Counts total number of users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
