/// Application state and router builder
///
/// This module defines the shared application state and provides a function
/// to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use placeboard_api::{app::AppState, config::Config};
/// use placeboard_shared::geocode::TomTomGeocoder;
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let geocoder = Arc::new(TomTomGeocoder::new(config.geocoding.api_key.clone()));
/// let state = AppState::new(pool, config, geocoder);
/// let app = placeboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use placeboard_shared::geocode::Geocoder;
use placeboard_shared::repo::PlaceRepository;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Transactional place repository (the only writer of the Place↔User
    /// reference)
    pub places: PlaceRepository,

    /// Geocoding collaborator
    pub geocoder: Arc<dyn Geocoder>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            places: PlaceRepository::new(db.clone()),
            db,
            geocoder,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                        # Health check
/// └── /api/
///     ├── /places/
///     │   ├── GET    /:id            # Fetch a place
///     │   ├── GET    /user/:userId   # Places created by a user
///     │   ├── POST   /               # Create (transactional with user list)
///     │   ├── PATCH  /:id            # Edit title/description
///     │   └── DELETE /:id            # Delete (transactional with user list)
///     └── /users/
///         ├── GET  /                 # List users
///         ├── POST /signup           # Create account
///         └── POST /login            # Verify credentials
/// ```
///
/// Unmatched routes fall through to a fixed 404 body.
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let place_routes = Router::new()
        .route("/:id", get(routes::places::get_place_by_id))
        .route("/user/:user_id", get(routes::places::get_places_by_user_id))
        .route("/", post(routes::places::create_place))
        .route("/:id", patch(routes::places::update_place))
        .route("/:id", delete(routes::places::delete_place));

    let user_routes = Router::new()
        .route("/", get(routes::users::get_users))
        .route("/signup", post(routes::users::signup))
        .route("/login", post(routes::users::login));

    let api_routes = Router::new()
        .nest("/places", place_routes)
        .nest("/users", user_routes);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .fallback(routes::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // The SPA is served from a different origin during development; the
        // API itself carries no credentials, so permissive CORS is fine here.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
