use crate::DocumentDto;
use serde::Serialize;

/// Single document response
#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub document: DocumentDto,
}
