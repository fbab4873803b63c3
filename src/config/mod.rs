//! # Configuration System
//!
//! Layered configuration for the server: built-in defaults, an optional
//! TOML file, `FORM_RESPONSES__*` environment variables and finally
//! command-line flags, each layer overriding the one before.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use form_responses::config::{CliOverrides, ConfigManager};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load(&CliOverrides::default())?;
//! let port = manager.config().server.port;
//! let pool_size = manager.config().database.pool;
//! # Ok(())
//! # }
//! ```

pub mod loader;

use crate::error::{FormResponsesError, Result};
use crate::logging::LogFormat;
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;

pub use loader::{CliOverrides, ConfigManager};

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub fillout: FilloutConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

/// MySQL connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    /// Maximum pool connections
    pub pool: u32,
}

/// Upstream form API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilloutConfig {
    pub base_url: String,
    pub form_id: String,
    /// Bearer token forwarded to the upstream API
    pub secret: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 3306,
                username: String::new(),
                password: String::new(),
                database: String::new(),
                pool: 10,
            },
            fillout: FilloutConfig {
                base_url: "https://api.fillout.com/v1/api".to_string(),
                form_id: "cLZojxk94ous".to_string(),
                secret: String::new(),
            },
            logging: LoggingConfig {
                format: LogFormat::Pretty,
            },
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(FormResponsesError::ConfigurationError(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if self.database.pool == 0 {
            return Err(FormResponsesError::ConfigurationError(
                "database.pool must be greater than 0".to_string(),
            ));
        }

        if self.database.host.is_empty() {
            return Err(FormResponsesError::ConfigurationError(
                "database.host is required".to_string(),
            ));
        }

        if self.fillout.base_url.is_empty() || self.fillout.form_id.is_empty() {
            return Err(FormResponsesError::ConfigurationError(
                "fillout.base_url and fillout.form_id are required".to_string(),
            ));
        }

        Ok(())
    }

    /// `bind_address:port` for the listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username);

        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        if !self.database.is_empty() {
            options = options.database(&self.database);
        }
        options
    }
}
