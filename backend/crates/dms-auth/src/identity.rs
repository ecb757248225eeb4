use crate::Claims;

/// Result of successful authorization for one request.
/// This is the validated, trusted context handlers consume.
#[derive(Debug, Clone)]
pub struct IdentityContext {
    pub user_id: String,
    pub tenant_id: String,
    pub roles: Vec<String>,
}

impl IdentityContext {
    pub fn new(claims: &Claims, tenant_id: String) -> Self {
        Self {
            user_id: claims.username().to_string(),
            tenant_id,
            roles: claims.realm_access.roles.clone(),
        }
    }

    /// Membership test against the realm roles carried by the token.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
