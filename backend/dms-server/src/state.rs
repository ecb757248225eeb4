use dms_auth::{TenantResolver, TokenVerifier};

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared application state cloned into every request handler.
///
/// The verifier owns (via Arc) the key store, the only cross-request
/// mutable state in the process.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub verifier: Arc<TokenVerifier>,
    pub resolver: TenantResolver,
}
