use crate::{ConfigError, ConfigErrorResult, DEFAULT_KEY_REFRESH_SECS, DEFAULT_KEYCLOAK_URL, DEFAULT_REALM};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base URL of the Keycloak instance serving the realm's keys.
    pub keycloak_url: String,
    /// Realm name (issuer grouping) tokens must come from.
    pub realm: String,
    /// Maximum age of the cached verification key before a refresh is
    /// attempted on next use.
    pub key_refresh_secs: u64,
    /// Development-only: skip signature verification entirely.
    /// Never enable outside local development.
    pub insecure_skip_verify: bool,
    /// Use the token's username as the tenant when no tenant claim is
    /// present. A development convenience; production realms should
    /// issue tenant claims and turn this off.
    pub tenant_username_fallback: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            keycloak_url: String::from(DEFAULT_KEYCLOAK_URL),
            realm: String::from(DEFAULT_REALM),
            key_refresh_secs: DEFAULT_KEY_REFRESH_SECS,
            insecure_skip_verify: false,
            tenant_username_fallback: true,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.insecure_skip_verify {
            if self.keycloak_url.is_empty() {
                return Err(ConfigError::auth("auth.keycloak_url cannot be empty"));
            }
            if self.realm.is_empty() {
                return Err(ConfigError::auth("auth.realm cannot be empty"));
            }
        }

        if self.key_refresh_secs == 0 {
            return Err(ConfigError::auth(
                "auth.key_refresh_secs must be at least 1",
            ));
        }

        Ok(())
    }
}
