//! Tenant scope derivation from validated claims.
//!
//! Pure precedence function: no I/O, no shared state.

use crate::{Claims, ResolutionError};

use std::panic::Location;

use error_location::ErrorLocation;

/// Resource and role names carrying this prefix encode a tenant grant;
/// the tenant identifier is the suffix after the prefix.
pub const TENANT_PREFIX: &str = "tenant-";

/// Derives a tenant identifier from claims, first match wins:
///
/// 1. an explicit `tenant_id` claim,
/// 2. a `tenant-` prefixed resource name,
/// 3. a `tenant-` prefixed role inside any resource grant,
/// 4. the username (development fallback, disabled in production
///    deployments via `username_fallback`).
#[derive(Debug, Clone)]
pub struct TenantResolver {
    username_fallback: bool,
}

impl TenantResolver {
    pub fn new(username_fallback: bool) -> Self {
        Self { username_fallback }
    }

    #[track_caller]
    pub fn resolve(&self, claims: &Claims) -> Result<String, ResolutionError> {
        if let Some(tenant_id) = &claims.tenant_id
            && !tenant_id.is_empty()
        {
            return Ok(tenant_id.clone());
        }

        // Resource names take precedence over roles within resources,
        // so each pass runs over the whole map before the next starts.
        for resource in claims.resource_access.keys() {
            if let Some(tenant) = resource.strip_prefix(TENANT_PREFIX) {
                return Ok(tenant.to_string());
            }
        }

        for access in claims.resource_access.values() {
            for role in &access.roles {
                if let Some(tenant) = role.strip_prefix(TENANT_PREFIX) {
                    return Ok(tenant.to_string());
                }
            }
        }

        if self.username_fallback && !claims.username().is_empty() {
            return Ok(claims.username().to_string());
        }

        Err(ResolutionError::NoTenant {
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
