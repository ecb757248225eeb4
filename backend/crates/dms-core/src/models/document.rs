//! Document entity - the tenant-scoped metadata record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A document belongs to exactly one tenant. Documents of other tenants
/// are invisible: every storage operation carries the tenant identifier
/// alongside the document id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub tenant_id: String,
    pub title: String,
    pub extension: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a new document for a tenant. The id and both timestamps
    /// are assigned here; `created_at` never changes afterwards.
    pub fn new(
        tenant_id: String,
        title: String,
        extension: String,
        description: Option<String>,
        content: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            title,
            extension,
            description,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}
