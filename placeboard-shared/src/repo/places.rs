/// Transactional place repository
///
/// The Place↔User reference is bidirectional: `places.creator` points at the
/// owning user and `users.place_ids` lists the places that user created. The
/// two sides must never be observable in a half-applied state, so every write
/// that changes a place's existence goes through this repository, which
/// performs both collection writes inside one database transaction.
///
/// Handler code must never issue these writes directly; it calls
/// `create` / `update` / `delete` and maps the returned error class.
///
/// # Atomicity
///
/// sqlx transactions roll back on drop. Any `?` between `begin()` and
/// `commit()` abandons the transaction, so a failure mid-sequence leaves
/// neither the place row nor the `place_ids` mutation visible.
///
/// # Isolation
///
/// `create` takes a `FOR UPDATE` lock on the creator row before inserting,
/// and `delete` re-checks the place row inside its transaction. Concurrent
/// creates and deletes against the same user serialize on the row lock, so a
/// committed place always has its id in the creator's list and a deleted
/// place never leaves one behind.
///
/// # Example
///
/// ```no_run
/// use placeboard_shared::geocode::Coordinates;
/// use placeboard_shared::repo::places::{NewPlace, PlaceRepository};
/// use uuid::Uuid;
///
/// # async fn example(pool: sqlx::PgPool, creator: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let repo = PlaceRepository::new(pool);
///
/// let place = repo
///     .create(NewPlace {
///         title: "Empire State Building".to_string(),
///         description: "One of the most famous sky scrapers in the world!".to_string(),
///         address: "20 W 34th St, New York, NY 10001".to_string(),
///         image_url: "https://example.com/esb.jpg".to_string(),
///         location: Coordinates { lat: 40.748_441_7, lng: -73.985_664_0 },
///         creator,
///     })
///     .await?;
///
/// repo.delete(place.id).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::geocode::Coordinates;
use crate::models::{Place, User};

/// Input for creating a new place
#[derive(Debug, Clone)]
pub struct NewPlace {
    /// Title (already validated non-empty)
    pub title: String,

    /// Description (already validated for minimum length)
    pub description: String,

    /// Postal address as entered by the client
    pub address: String,

    /// Image URL
    pub image_url: String,

    /// Geocoded location for `address`, resolved by the caller via the
    /// geocoding collaborator
    pub location: Coordinates,

    /// Id of the owning user; must reference an existing user
    pub creator: Uuid,
}

/// Input for updating a place's editable fields
///
/// Title and description are the only mutable fields. The creator reference
/// and the location are fixed at creation.
#[derive(Debug, Clone)]
pub struct PlaceUpdate {
    /// New title
    pub title: String,

    /// New description
    pub description: String,
}

/// Errors from the place repository
///
/// The two NotFound variants are precondition failures raised before any
/// write is attempted; `Database` covers store failures during the
/// transactional sequence (surfaced to clients as an internal error).
#[derive(Debug, thiserror::Error)]
pub enum PlaceRepoError {
    /// The creator id does not resolve to an existing user
    #[error("Could not find user for provided id: {0}")]
    CreatorNotFound(Uuid),

    /// The place id does not resolve to an existing place
    #[error("Could not find a place with id: {0}")]
    PlaceNotFound(Uuid),

    /// Store-level failure (connectivity, constraint violation)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository owning all writes to the Place↔User reference
#[derive(Debug, Clone)]
pub struct PlaceRepository {
    pool: PgPool,
}

impl PlaceRepository {
    /// Creates a repository over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a place and appends its id to the creator's place list
    ///
    /// # Preconditions
    ///
    /// The creator must exist. This is checked with a plain read before a
    /// transaction is opened, so a bad id never costs a transaction, and
    /// re-checked under a row lock inside the transaction so a concurrent
    /// deletion cannot slip between check and write.
    ///
    /// # Errors
    ///
    /// - `CreatorNotFound` if no user matches `data.creator`
    /// - `Database` on any store failure; the transaction is rolled back and
    ///   neither the place nor the reference update is observable
    pub async fn create(&self, data: NewPlace) -> Result<Place, PlaceRepoError> {
        if User::find_by_id(&self.pool, data.creator).await?.is_none() {
            return Err(PlaceRepoError::CreatorNotFound(data.creator));
        }

        let mut tx = self.pool.begin().await?;

        // Lock the creator row for the duration of the transaction. Also
        // re-confirms existence, since the precondition read was unlocked.
        let locked: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM users WHERE id = $1 FOR UPDATE")
                .bind(data.creator)
                .fetch_optional(&mut *tx)
                .await?;

        if locked.is_none() {
            return Err(PlaceRepoError::CreatorNotFound(data.creator));
        }

        let place = sqlx::query_as::<_, Place>(
            r#"
            INSERT INTO places (title, description, image_url, address, lat, lng, creator)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, image_url, address, lat, lng, creator,
                      created_at, updated_at
            "#,
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.image_url)
        .bind(&data.address)
        .bind(data.location.lat)
        .bind(data.location.lng)
        .bind(data.creator)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET place_ids = array_append(place_ids, $1), updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(place.id)
        .bind(data.creator)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(place_id = %place.id, creator = %place.creator, "Created place");
        Ok(place)
    }

    /// Updates a place's title and description
    ///
    /// Single-row write; no transaction is needed. The creator reference and
    /// the creator's place list are untouched.
    ///
    /// # Errors
    ///
    /// - `PlaceNotFound` if no place matches `id`
    /// - `Database` on store failure
    pub async fn update(&self, id: Uuid, data: PlaceUpdate) -> Result<Place, PlaceRepoError> {
        let place = sqlx::query_as::<_, Place>(
            r#"
            UPDATE places
            SET title = $2, description = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, image_url, address, lat, lng, creator,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(PlaceRepoError::PlaceNotFound(id))?;

        debug!(place_id = %place.id, "Updated place");
        Ok(place)
    }

    /// Deletes a place and removes its id from the creator's place list
    ///
    /// # Preconditions
    ///
    /// The place must exist; it is resolved together with its owning user in
    /// one call before the transaction opens.
    ///
    /// # Errors
    ///
    /// - `PlaceNotFound` if no place matches `id` (including a concurrent
    ///   delete winning the race inside the transaction)
    /// - `Database` on any store failure; removal is all-or-nothing
    pub async fn delete(&self, id: Uuid) -> Result<(), PlaceRepoError> {
        let Some((place, creator)) = Place::find_with_creator(&self.pool, id).await? else {
            return Err(PlaceRepoError::PlaceNotFound(id));
        };

        let mut tx = self.pool.begin().await?;

        let deleted: Option<(Uuid,)> =
            sqlx::query_as("DELETE FROM places WHERE id = $1 RETURNING creator")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((creator_id,)) = deleted else {
            // Lost a race with another delete; nothing was written.
            return Err(PlaceRepoError::PlaceNotFound(id));
        };

        sqlx::query(
            r#"
            UPDATE users
            SET place_ids = array_remove(place_ids, $1), updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(id)
        .bind(creator_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(place_id = %place.id, creator = %creator.id, "Deleted place");
        Ok(())
    }
}
