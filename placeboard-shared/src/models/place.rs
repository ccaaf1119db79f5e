/// Place model and database operations
///
/// A place is a point-of-interest record with a geocoded location and exactly
/// one owning user (`creator`). This module only contains reads and the
/// structs shared with the repository; inserting or deleting a place also
/// mutates the creator's `place_ids` list and therefore lives exclusively in
/// `crate::repo::places`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE places (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL,
///     image_url VARCHAR(512) NOT NULL,
///     address VARCHAR(512) NOT NULL,
///     lat DOUBLE PRECISION NOT NULL,
///     lng DOUBLE PRECISION NOT NULL,
///     creator UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::user::User;

const PLACE_COLUMNS: &str =
    "id, title, description, image_url, address, lat, lng, creator, created_at, updated_at";

/// Place model representing a point-of-interest record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Place {
    /// Unique place ID (UUID v4)
    pub id: Uuid,

    /// Title (non-empty)
    pub title: String,

    /// Description (minimum length enforced at the API boundary)
    pub description: String,

    /// Image URL
    pub image_url: String,

    /// Postal address as entered by the client
    pub address: String,

    /// Geocoded latitude
    pub lat: f64,

    /// Geocoded longitude
    pub lng: f64,

    /// Id of the owning user
    ///
    /// Mirror of the creator's `place_ids` entry; set once at creation and
    /// never updated
    pub creator: Uuid,

    /// When the place was created
    pub created_at: DateTime<Utc>,

    /// When the place was last updated
    pub updated_at: DateTime<Utc>,
}

impl Place {
    /// Finds a place by ID
    ///
    /// Returns the place if found, None otherwise.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let place = sqlx::query_as::<_, Place>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(place)
    }

    /// Finds all places created by the given user
    ///
    /// Ordered by creation date (oldest first), matching the order ids are
    /// appended to the creator's `place_ids` list.
    pub async fn find_by_creator(pool: &PgPool, creator: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let places = sqlx::query_as::<_, Place>(&format!(
            "SELECT {PLACE_COLUMNS} FROM places WHERE creator = $1 ORDER BY created_at"
        ))
        .bind(creator)
        .fetch_all(pool)
        .await?;

        Ok(places)
    }

    /// Resolves a place together with its owning user in one call
    ///
    /// The reverse "populate" lookup, used by the delete path which needs the
    /// creator row it is about to mutate. Returns `None` if the place does
    /// not exist.
    pub async fn find_with_creator(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<(Self, User)>, sqlx::Error> {
        let Some(place) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        // The FK guarantees the creator row exists; a miss here means the
        // store itself is inconsistent.
        let user = User::find_by_id(pool, place.creator)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        Ok(Some((place, user)))
    }

    /// Counts total number of places
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM places")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_columns_complete() {
        for col in ["lat", "lng", "creator", "address", "image_url"] {
            assert!(PLACE_COLUMNS.contains(col), "missing column {col}");
        }
    }
}
