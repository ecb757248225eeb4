pub mod create_document_request;
pub mod document_dto;
pub mod document_response;
#[allow(clippy::module_inception)]
pub mod documents;
pub mod update_document_request;
