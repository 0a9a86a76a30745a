//! Configuration module
//!
//! Loads a TOML config file (default: ~/.config/tours-service/config.toml,
//! overridable via the TOURS_CONFIG env var). Every field has a default
//! so a missing file or a partial file still yields a runnable config.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::infrastructure::crypto::jwt::JwtConfig;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub smtp: SmtpConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// API bind host
    pub host: String,
    /// API bind port
    pub port: u16,
    /// Externally visible base URL, used in reset links
    pub public_base_url: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            public_base_url: "http://localhost:8000".to_string(),
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// JWT signing secret. `JWT_SECRET` env var takes precedence.
    pub jwt_secret: String,
    /// Session token lifetime in days
    pub jwt_expiration_days: i64,
    /// Password-reset window in minutes
    pub reset_token_minutes: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "super-secret-key-change-in-production".to_string(),
            jwt_expiration_days: 90,
            reset_token_minutes: 10,
        }
    }
}

impl SecurityConfig {
    /// Build the JwtConfig injected into token issuance and the
    /// access-control middleware. The secret is process-wide and
    /// read-only after startup.
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: std::env::var("JWT_SECRET").unwrap_or_else(|_| self.jwt_secret.clone()),
            expiration_days: self.jwt_expiration_days,
            issuer: "tours-service".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// From header, e.g. "Trailhead Tours <no-reply@example.com>"
    pub from: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from: "Trailhead Tours <no-reply@localhost>".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            name: "Administrator".to_string(),
            email: "admin@localhost".to_string(),
            password: "change-me-immediately".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter, overridable via RUST_LOG
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {0}: {1}")]
    Io(PathBuf, String),

    #[error("Failed to parse config {0}: {1}")]
    Parse(PathBuf, String),
}

/// Default config file location: `~/.config/tours-service/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tours-service")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.security.jwt_expiration_days, 90);
        assert_eq!(cfg.security.reset_token_minutes, 10);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_toml_fills_missing_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9100

            [security]
            jwt_secret = "from-file"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.security.jwt_secret, "from-file");
        assert_eq!(cfg.smtp.port, 587);
    }
}
