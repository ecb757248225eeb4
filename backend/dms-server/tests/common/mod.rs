#![allow(dead_code)]

//! Test infrastructure for dms-server API tests

use dms_auth::{TenantResolver, TokenVerifier};
use dms_server::AppState;

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sqlx::SqlitePool;

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test database");

    dms_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState with a trusting verifier (claims accepted without a
/// signature) and username fallback enabled.
pub async fn create_test_app_state() -> AppState {
    AppState {
        pool: create_test_pool().await,
        verifier: Arc::new(TokenVerifier::Trusting),
        resolver: TenantResolver::new(true),
    }
}

/// Same as [`create_test_app_state`] but with username fallback off,
/// so claims without any tenant marker resolve to nothing.
pub async fn create_test_app_state_no_fallback() -> AppState {
    AppState {
        pool: create_test_pool().await,
        verifier: Arc::new(TokenVerifier::Trusting),
        resolver: TenantResolver::new(false),
    }
}

/// Build an unsigned JWT from a claims JSON value. Only the trusting
/// verifier accepts these.
pub fn mint_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.", header, payload)
}

/// Claims for a user with an explicit tenant_id, expiring in an hour.
pub fn tenant_claims(username: &str, tenant_id: &str) -> serde_json::Value {
    serde_json::json!({
        "sub": format!("uid-{}", username),
        "preferred_username": username,
        "exp": chrono::Utc::now().timestamp() + 3600,
        "tenant_id": tenant_id,
    })
}
