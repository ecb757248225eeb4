//! Document REST API handlers
//!
//! All handlers require an authenticated [`Identity`]; the tenant
//! scope it carries bounds every storage operation.

use crate::{
    ApiError, ApiResult, CreateDocumentRequest, DeleteResponse, DocumentDto, DocumentResponse,
    Identity, UpdateDocumentRequest,
};
use crate::state::AppState;

use dms_core::Document;
use dms_db::DocumentRepository;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// POST /documents
///
/// Create a document under the caller's tenant.
pub async fn create_document(
    State(state): State<AppState>,
    Identity(identity): Identity,
    Json(request): Json<CreateDocumentRequest>,
) -> ApiResult<(StatusCode, Json<DocumentResponse>)> {
    if request.title.is_empty() {
        return Err(ApiError::validation(
            "title cannot be empty",
            Some("title".to_string()),
        ));
    }

    let document = Document::new(
        identity.tenant_id.clone(),
        request.title,
        request.extension,
        request.description,
        request.content,
    );

    let repo = DocumentRepository::new(state.pool.clone());
    repo.create(&document).await?;

    log::info!(
        "Document {} created for tenant {}",
        document.id,
        identity.tenant_id
    );

    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse {
            document: document.into(),
        }),
    ))
}

/// GET /documents/{id}
///
/// Fetch a single document. A document owned by another tenant is
/// indistinguishable from a missing one.
pub async fn get_document(
    State(state): State<AppState>,
    Identity(identity): Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<DocumentResponse>> {
    let document_id = Uuid::parse_str(&id)?;

    let repo = DocumentRepository::new(state.pool.clone());
    let document = repo
        .find_by_id(document_id, &identity.tenant_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Document {} not found", id)))?;

    Ok(Json(DocumentResponse {
        document: document.into(),
    }))
}

/// PUT /documents/{id}
///
/// Replace a document's mutable fields in place.
pub async fn update_document(
    State(state): State<AppState>,
    Identity(identity): Identity,
    Path(id): Path<String>,
    Json(request): Json<UpdateDocumentRequest>,
) -> ApiResult<Json<DocumentResponse>> {
    let document_id = Uuid::parse_str(&id)?;

    if request.title.is_empty() {
        return Err(ApiError::validation(
            "title cannot be empty",
            Some("title".to_string()),
        ));
    }

    let repo = DocumentRepository::new(state.pool.clone());
    let existing = repo
        .find_by_id(document_id, &identity.tenant_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Document {} not found", id)))?;

    let updated = Document {
        id: existing.id,
        tenant_id: existing.tenant_id,
        title: request.title,
        extension: request.extension,
        description: request.description,
        content: request.content,
        created_at: existing.created_at,
        updated_at: chrono::Utc::now(),
    };

    if !repo.update(&updated).await? {
        return Err(ApiError::not_found(format!("Document {} not found", id)));
    }

    Ok(Json(DocumentResponse {
        document: updated.into(),
    }))
}

/// DELETE /documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    Identity(identity): Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let document_id = Uuid::parse_str(&id)?;

    let repo = DocumentRepository::new(state.pool.clone());
    if !repo.delete(document_id, &identity.tenant_id).await? {
        return Err(ApiError::not_found(format!("Document {} not found", id)));
    }

    log::info!(
        "Document {} deleted for tenant {}",
        document_id,
        identity.tenant_id
    );

    Ok(Json(DeleteResponse {
        message: "Document deleted successfully".to_string(),
    }))
}
