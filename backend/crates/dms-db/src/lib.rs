pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::document_repository::DocumentRepository;

/// Embedded migrations, applied at startup and in tests.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
