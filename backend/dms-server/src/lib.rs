pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

pub use api::{
    delete_response::DeleteResponse,
    documents::{
        create_document_request::CreateDocumentRequest,
        document_dto::DocumentDto,
        document_response::DocumentResponse,
        documents::{create_document, delete_document, get_document, update_document},
        update_document_request::UpdateDocumentRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::identity::Identity,
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
