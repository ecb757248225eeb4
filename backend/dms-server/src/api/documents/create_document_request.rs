use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    /// Document title (required)
    pub title: String,

    /// File extension, e.g. "md" or "pdf"
    #[serde(default)]
    pub extension: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Content body
    #[serde(default)]
    pub content: String,
}
