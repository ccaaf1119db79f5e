/// Common test utilities for integration tests
///
/// Provides shared infrastructure:
/// - Test database setup (migrations run on first connect)
/// - Router construction with a fixed geocoder (no network, no API key)
/// - Request helpers driving the router through tower's `oneshot`
/// - Cleanup of rows created by a test
///
/// Tests skip themselves when `DATABASE_URL` is not set, so the unit suite
/// stays green without a running PostgreSQL.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use placeboard_api::app::{build_router, AppState};
use placeboard_api::config::{ApiConfig, Config, DatabaseConfig, GeocodingConfig};
use placeboard_shared::geocode::FixedGeocoder;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    /// Users created through this context, removed by `cleanup`
    created_users: Vec<Uuid>,
}

/// Coordinates the fixed geocoder answers with
pub const TEST_LAT: f64 = 40.748_441_7;
pub const TEST_LNG: f64 = -73.985_664_0;

impl TestContext {
    /// Creates a test context, or `None` when `DATABASE_URL` is absent
    pub async fn new() -> anyhow::Result<Option<Self>> {
        Self::with_geocoder(Arc::new(FixedGeocoder::new(TEST_LAT, TEST_LNG))).await
    }

    /// Creates a context whose geocoder rejects every address
    pub async fn with_unresolvable_geocoder() -> anyhow::Result<Option<Self>> {
        Self::with_geocoder(Arc::new(FixedGeocoder::unresolvable())).await
    }

    async fn with_geocoder(
        geocoder: Arc<dyn placeboard_shared::geocode::Geocoder>,
    ) -> anyhow::Result<Option<Self>> {
        dotenvy::dotenv().ok();

        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return Ok(None);
        };

        let db = PgPool::connect(&url).await?;

        // Path relative to this crate's Cargo.toml
        sqlx::migrate!("../placeboard-shared/migrations")
            .run(&db)
            .await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            geocoding: GeocodingConfig {
                api_key: "test-key".to_string(),
                base_url: "http://localhost:0".to_string(),
            },
        };

        let state = AppState::new(db.clone(), config, geocoder);
        let app = build_router(state);

        Ok(Some(Self {
            db,
            app,
            created_users: Vec::new(),
        }))
    }

    /// Sends a request and returns (status, parsed JSON body)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let request = builder.body(body).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Signs up a user with a unique email and returns its id
    pub async fn signup_user(&mut self, name: &str) -> Uuid {
        let email = format!("test-{}@example.com", Uuid::new_v4());
        let (status, body) = self
            .request(
                "POST",
                "/api/users/signup",
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": "secret123",
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
        let id: Uuid = body["user"]["id"].as_str().unwrap().parse().unwrap();
        self.created_users.push(id);
        id
    }

    /// Creates a place for the given creator and returns its id
    pub async fn create_place(&self, creator: Uuid, title: &str) -> Uuid {
        let (status, body) = self
            .request(
                "POST",
                "/api/places",
                Some(serde_json::json!({
                    "title": title,
                    "description": "A place worth remembering",
                    "address": "20 W 34th St, New York, NY 10001",
                    "creator": creator,
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "create place failed: {}", body);
        body["place"]["id"].as_str().unwrap().parse().unwrap()
    }

    /// Fetches a user row straight from the store
    pub async fn fetch_user(&self, id: Uuid) -> placeboard_shared::models::User {
        placeboard_shared::models::User::find_by_id(&self.db, id)
            .await
            .unwrap()
            .expect("test user should exist")
    }

    /// Removes rows created through this context
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        for user_id in &self.created_users {
            sqlx::query("DELETE FROM places WHERE creator = $1")
                .bind(user_id)
                .execute(&self.db)
                .await?;
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(user_id)
                .execute(&self.db)
                .await?;
        }
        Ok(())
    }
}
