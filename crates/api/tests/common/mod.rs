#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use cashcompass_core::finance::FinancialSnapshot;
use cashcompass_core::types::DbId;
use cashcompass_db::store::AlertStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

use cashcompass_api::auth::jwt::{generate_access_token, JwtConfig};
use cashcompass_api::config::ServerConfig;
use cashcompass_api::router::build_app_router;
use cashcompass_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 15,
    }
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

/// The production router over `store`.
pub fn build_test_app(store: Arc<dyn AlertStore>) -> Router {
    build_app_router(AppState {
        store,
        config: Arc::new(test_config()),
    })
}

pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_jwt_config()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    post_raw_auth(app, uri, token, &body.to_string()).await
}

pub async fn post_raw_auth(app: Router, uri: &str, token: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A store whose every call fails, for exercising error paths.
pub struct FailingStore;

#[async_trait]
impl AlertStore for FailingStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn load_snapshot(&self, _user_id: DbId) -> Result<FinancialSnapshot, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn dismissed_hashes(&self, _user_id: DbId) -> Result<HashSet<String>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn dismiss(&self, _user_id: DbId, _alert_hash: &str) -> Result<bool, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn reset(&self, _user_id: DbId) -> Result<u64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}
