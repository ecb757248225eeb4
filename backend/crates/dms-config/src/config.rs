use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, LoggingConfig, ServerConfig,
};

use std::path::PathBuf;
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for DMS_CONFIG_DIR env var, else use ./.dms/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply DMS_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: DMS_CONFIG_DIR env var > ./.dms/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("DMS_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".dms"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;

        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  database: {}", self.database.path);

        if self.auth.insecure_skip_verify {
            info!("  auth: INSECURE signature verification bypass (dev only)");
        } else {
            info!(
                "  auth: {} realm '{}', key refresh {}s",
                self.auth.keycloak_url, self.auth.realm, self.auth.key_refresh_secs
            );
        }
        info!(
            "  tenant username fallback: {}",
            self.auth.tenant_username_fallback
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("DMS_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("DMS_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("DMS_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_string("DMS_KEYCLOAK_URL", &mut self.auth.keycloak_url);
        Self::apply_env_string("DMS_KEYCLOAK_REALM", &mut self.auth.realm);
        Self::apply_env_parse("DMS_AUTH_KEY_REFRESH_SECS", &mut self.auth.key_refresh_secs);
        Self::apply_env_bool(
            "DMS_AUTH_INSECURE_SKIP_VERIFY",
            &mut self.auth.insecure_skip_verify,
        );
        Self::apply_env_bool(
            "DMS_AUTH_TENANT_USERNAME_FALLBACK",
            &mut self.auth.tenant_username_fallback,
        );

        // Logging
        Self::apply_env_parse("DMS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("DMS_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("DMS_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var: &str, target: &mut String) {
        if let Ok(value) = std::env::var(var) {
            *target = value;
        }
    }

    fn apply_env_parse<T: FromStr>(var: &str, target: &mut T) {
        if let Ok(value) = std::env::var(var)
            && let Ok(parsed) = value.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_bool(var: &str, target: &mut bool) {
        if let Ok(value) = std::env::var(var) {
            *target = matches!(value.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    fn apply_env_option_string(var: &str, target: &mut Option<String>) {
        if let Ok(value) = std::env::var(var) {
            *target = if value.is_empty() { None } else { Some(value) };
        }
    }
}
