//! Document repository for tenant-scoped CRUD.
//!
//! Every query predicate carries the tenant identifier: a document id
//! presented with the wrong tenant behaves exactly like a missing row.

use crate::{DbError, Result as DbErrorResult};

use dms_core::Document;

use std::panic::Location;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, document: &Document) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO documents (
                    id, tenant_id, title, extension, description, content,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(document.id.to_string())
        .bind(&document.tenant_id)
        .bind(&document.title)
        .bind(&document.extension)
        .bind(&document.description)
        .bind(&document.content)
        .bind(document.created_at.timestamp())
        .bind(document.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid, tenant_id: &str) -> DbErrorResult<Option<Document>> {
        let row = sqlx::query(
            r#"
                SELECT id, tenant_id, title, extension, description, content,
                    created_at, updated_at
                FROM documents
                WHERE id = ? AND tenant_id = ?
            "#,
        )
        .bind(id.to_string())
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_document).transpose()
    }

    /// Update a document in place. Id and `created_at` are immutable;
    /// only content fields and `updated_at` change. Returns false when
    /// no row matched the id+tenant pair.
    pub async fn update(&self, document: &Document) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE documents
                SET title = ?, extension = ?, description = ?, content = ?,
                    updated_at = ?
                WHERE id = ? AND tenant_id = ?
            "#,
        )
        .bind(&document.title)
        .bind(&document.extension)
        .bind(&document.description)
        .bind(&document.content)
        .bind(document.updated_at.timestamp())
        .bind(document.id.to_string())
        .bind(&document.tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete by id+tenant pair. Returns false when nothing matched.
    pub async fn delete(&self, id: Uuid, tenant_id: &str) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ? AND tenant_id = ?")
            .bind(id.to_string())
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_document(row: SqliteRow) -> DbErrorResult<Document> {
    let id: String = row.try_get("id")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(Document {
        id: Uuid::parse_str(&id).map_err(|e| DbError::CorruptRow {
            message: format!("Invalid UUID in documents.id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        tenant_id: row.try_get("tenant_id")?,
        title: row.try_get("title")?,
        extension: row.try_get("extension")?,
        description: row.try_get("description")?,
        content: row.try_get("content")?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| DbError::CorruptRow {
            message: "Invalid timestamp in documents.created_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
        updated_at: DateTime::from_timestamp(updated_at, 0).ok_or_else(|| DbError::CorruptRow {
            message: "Invalid timestamp in documents.updated_at".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?,
    })
}
