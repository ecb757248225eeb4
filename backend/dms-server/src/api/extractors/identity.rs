//! Axum extractor implementing the authentication gate.
//!
//! Extracts the bearer token, verifies it, resolves the tenant scope,
//! and hands handlers a trusted [`IdentityContext`]. All verification
//! failures collapse into a generic 401; tenant-resolution failures
//! into a 403. Internal causes are logged, never sent to clients.

use crate::ApiError;
use crate::state::AppState;

use dms_auth::IdentityContext;

use std::future::Future;

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

const BEARER_PREFIX: &str = "Bearer ";

/// The authenticated caller of the current request.
pub struct Identity(pub IdentityContext);

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| ApiError::unauthorized("Authorization header is required"))?;

            let token = header
                .strip_prefix(BEARER_PREFIX)
                .ok_or_else(|| ApiError::unauthorized("Bearer token is required"))?;

            let claims = state.verifier.verify(token).await.map_err(|e| {
                log::warn!("Token verification failed: {}", e);
                ApiError::unauthorized("Invalid token")
            })?;

            let tenant_id = state.resolver.resolve(&claims).map_err(|e| {
                log::warn!("Tenant resolution failed for '{}': {}", claims.username(), e);
                ApiError::forbidden("No tenant access")
            })?;

            Ok(Identity(IdentityContext::new(&claims, tenant_id)))
        }
    }
}
