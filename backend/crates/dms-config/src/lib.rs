mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod server_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8085;
const MIN_PORT: u16 = 1024;
const DEFAULT_DATABASE_FILENAME: &str = "dms.db";
const DEFAULT_KEYCLOAK_URL: &str = "http://keycloak:8080";
const DEFAULT_REALM: &str = "dms";
const DEFAULT_KEY_REFRESH_SECS: u64 = 300;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
