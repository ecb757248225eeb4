pub mod delete_response;
pub mod documents;
pub mod error;
pub mod extractors;
