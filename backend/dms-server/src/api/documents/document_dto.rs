use dms_core::Document;

use serde::Serialize;

/// Document DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct DocumentDto {
    pub id: String,
    pub tenant_id: String,
    pub title: String,
    pub extension: String,
    pub description: Option<String>,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Document> for DocumentDto {
    fn from(d: Document) -> Self {
        Self {
            id: d.id.to_string(),
            tenant_id: d.tenant_id,
            title: d.title,
            extension: d.extension,
            description: d.description,
            content: d.content,
            created_at: d.created_at.timestamp(),
            updated_at: d.updated_at.timestamp(),
        }
    }
}
