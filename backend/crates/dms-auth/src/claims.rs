use crate::VerifyError;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Realm-wide role grants carried in the token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Role grants scoped to a single resource (client).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// JWT claims structure - matches the Keycloak token format.
///
/// `resource_access` is an ordered map so tenant resolution scans
/// resources in a deterministic order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity provider user id)
    #[serde(default)]
    pub sub: String,
    /// Human-readable username
    #[serde(default)]
    pub preferred_username: String,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    #[serde(default)]
    pub iat: i64,
    /// Issuer (realm URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Realm-wide roles
    #[serde(default)]
    pub realm_access: RealmAccess,
    /// Per-resource role grants
    #[serde(default)]
    pub resource_access: BTreeMap<String, ResourceAccess>,
    /// Explicit tenant identifier, when the realm issues one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl Claims {
    /// Validate claims after signature verification.
    #[track_caller]
    pub fn validate(&self) -> Result<(), VerifyError> {
        if self.preferred_username.is_empty() && self.sub.is_empty() {
            return Err(VerifyError::MissingClaim {
                claim: "preferred_username".to_string(),
                location: error_location::ErrorLocation::from(std::panic::Location::caller()),
            });
        }

        Ok(())
    }

    /// The username to attribute requests to: `preferred_username`
    /// when present, otherwise the raw subject.
    pub fn username(&self) -> &str {
        if self.preferred_username.is_empty() {
            &self.sub
        } else {
            &self.preferred_username
        }
    }
}
