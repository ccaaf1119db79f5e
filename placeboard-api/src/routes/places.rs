/// Place endpoints
///
/// # Endpoints
///
/// - `GET /api/places/:id` - Fetch a single place
/// - `GET /api/places/user/:userId` - Places created by a user
/// - `POST /api/places` - Create a place (transactional with the creator's
///   place list)
/// - `PATCH /api/places/:id` - Edit title/description
/// - `DELETE /api/places/:id` - Delete a place (transactional with the
///   creator's place list)
///
/// Creation and deletion never touch the store directly; they go through
/// `PlaceRepository` so the Place↔User reference is updated atomically.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use placeboard_shared::geocode::Coordinates;
use placeboard_shared::models::Place;
use placeboard_shared::repo::{NewPlace, PlaceUpdate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Fallback image for places created without one (uploads are out of scope;
/// image fields carry URLs only)
const DEFAULT_PLACE_IMAGE: &str =
    "https://cdn.pixabay.com/photo/2015/04/23/22/00/tree-736885__480.jpg";

/// Place representation returned to clients
///
/// Coordinates are nested under `location` to match the SPA's wire shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceDto {
    /// Place ID
    pub id: Uuid,

    /// Title
    pub title: String,

    /// Description
    pub description: String,

    /// Image URL
    pub image: String,

    /// Postal address
    pub address: String,

    /// Geocoded location
    pub location: Coordinates,

    /// Owning user ID
    pub creator: Uuid,
}

impl From<Place> for PlaceDto {
    fn from(place: Place) -> Self {
        Self {
            id: place.id,
            title: place.title,
            description: place.description,
            image: place.image_url,
            address: place.address,
            location: Coordinates {
                lat: place.lat,
                lng: place.lng,
            },
            creator: place.creator,
        }
    }
}

/// Single-place response body
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceResponse {
    /// The place
    pub place: PlaceDto,
}

/// Place-list response body
#[derive(Debug, Serialize, Deserialize)]
pub struct PlacesResponse {
    /// The places
    pub places: Vec<PlaceDto>,
}

/// Acknowledgement response body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable acknowledgement
    pub message: String,
}

/// Create place request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlaceRequest {
    /// Title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// Description
    #[validate(length(min = 5, message = "Description must be at least 5 characters"))]
    pub description: String,

    /// Postal address (geocoded server-side)
    #[validate(length(min = 1, message = "Address must not be empty"))]
    pub address: String,

    /// Id of the creating user
    pub creator: Uuid,

    /// Optional image URL
    pub image: Option<String>,
}

/// Update place request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlaceRequest {
    /// New title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// New description
    #[validate(length(min = 5, message = "Description must be at least 5 characters"))]
    pub description: String,
}

/// Fetch a single place by id
///
/// # Errors
///
/// - `404 Not Found`: no place with that id
pub async fn get_place_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PlaceResponse>> {
    let place = Place::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Could not find a place with id: {}", id)))?;

    Ok(Json(PlaceResponse {
        place: place.into(),
    }))
}

/// Fetch all places created by a user
///
/// Resolves the user together with its places in one call. A missing user
/// and a user with no places both answer 404, matching the SPA's contract.
///
/// # Errors
///
/// - `404 Not Found`: unknown user, or user has no places
pub async fn get_places_by_user_id(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<PlacesResponse>> {
    let places = placeboard_shared::models::User::find_with_places(&state.db, user_id)
        .await?
        .map(|(_, places)| places)
        .unwrap_or_default();

    if places.is_empty() {
        return Err(ApiError::NotFound(format!(
            "Could not find places for the provided user id: {}",
            user_id
        )));
    }

    Ok(Json(PlacesResponse {
        places: places.into_iter().map(Into::into).collect(),
    }))
}

/// Create a place
///
/// Geocodes the address, then inserts the place and appends its id to the
/// creator's place list inside one transaction.
///
/// # Endpoint
///
/// ```text
/// POST /api/places
/// Content-Type: application/json
///
/// {
///   "title": "Empire State Building",
///   "description": "One of the most famous sky scrapers in the world!",
///   "address": "20 W 34th St, New York, NY 10001",
///   "creator": "uuid"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed, or the address could not
///   be geocoded
/// - `404 Not Found`: creator id does not resolve to a user
/// - `500 Internal Server Error`: store or geocoding transport failure (the
///   transaction is rolled back; no partial state survives)
pub async fn create_place(
    State(state): State<AppState>,
    Json(req): Json<CreatePlaceRequest>,
) -> ApiResult<(StatusCode, Json<PlaceResponse>)> {
    req.validate()?;

    let location: Coordinates = state.geocoder.geocode(&req.address).await?;

    let place = state
        .places
        .create(NewPlace {
            title: req.title,
            description: req.description,
            address: req.address,
            image_url: req.image.unwrap_or_else(|| DEFAULT_PLACE_IMAGE.to_string()),
            location,
            creator: req.creator,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PlaceResponse {
            place: place.into(),
        }),
    ))
}

/// Edit a place's title and description
///
/// Single-row write; the creator reference and the creator's place list are
/// never touched here.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: validation failed
/// - `404 Not Found`: no place with that id
pub async fn update_place(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePlaceRequest>,
) -> ApiResult<Json<PlaceResponse>> {
    req.validate()?;

    let place = state
        .places
        .update(
            id,
            PlaceUpdate {
                title: req.title,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(PlaceResponse {
        place: place.into(),
    }))
}

/// Delete a place
///
/// Removes the place and its id from the creator's place list inside one
/// transaction.
///
/// # Errors
///
/// - `404 Not Found`: no place with that id
/// - `500 Internal Server Error`: store failure mid-transaction (rolled back)
pub async fn delete_place(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    state.places.delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Deleted place.".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_dto_nests_location() {
        let place = Place {
            id: Uuid::nil(),
            title: "t".to_string(),
            description: "d".to_string(),
            image_url: "i".to_string(),
            address: "a".to_string(),
            lat: 1.5,
            lng: -2.5,
            creator: Uuid::nil(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let dto: PlaceDto = place.into();
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["location"]["lat"], 1.5);
        assert_eq!(json["location"]["lng"], -2.5);
        assert_eq!(json["image"], "i");
    }

    #[test]
    fn test_create_request_validation() {
        let req = CreatePlaceRequest {
            title: "".to_string(),
            description: "ok".to_string(),
            address: "somewhere".to_string(),
            creator: Uuid::nil(),
            image: None,
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
        assert!(!fields.contains_key("address"));
    }

    #[test]
    fn test_update_request_validation() {
        let req = UpdatePlaceRequest {
            title: "A new title".to_string(),
            description: "A long enough description".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
