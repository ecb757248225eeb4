use serde::Deserialize;

/// Full replacement of a document's mutable fields. The identifier,
/// owning tenant, and creation timestamp never change.
#[derive(Debug, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: String,

    #[serde(default)]
    pub extension: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: String,
}
