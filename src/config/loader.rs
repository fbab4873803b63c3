//! Configuration Loader
//!
//! Builds an [`AppConfig`] from defaults, an optional TOML file,
//! environment variables and command-line overrides.

use super::AppConfig;
use crate::error::{FormResponsesError, Result};
use crate::logging;
use config::{Config, ConfigBuilder, Environment, File};
use std::path::PathBuf;
use tracing::{debug, info};

/// Prefix of environment overrides, e.g. `FORM_RESPONSES__SERVER__PORT`
pub const ENV_PREFIX: &str = "FORM_RESPONSES";

/// Config file looked up when `--config` is not given; any supported
/// extension works, `.toml` is the expected one
pub const DEFAULT_CONFIG_FILE: &str = "config/form-responses";

/// Values supplied on the command line; `None` leaves the lower layers alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub secret: Option<String>,
    pub host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub config: Option<PathBuf>,
}

/// Loaded configuration plus the environment it was loaded for
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AppConfig,
    environment: String,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load(overrides: &CliOverrides) -> Result<ConfigManager> {
        let environment = logging::get_environment();
        let config = Self::build(overrides)?;

        config.validate()?;

        debug!(
            "Configuration loaded: {}",
            serde_json::to_string(&Self::sanitize_config_for_logging(&config))
                .unwrap_or_else(|_| "[serialization error]".to_string())
        );
        info!(
            environment = %environment,
            database_host = %config.database.host,
            pool_size = config.database.pool,
            port = config.server.port,
            "Configuration loaded successfully"
        );

        Ok(ConfigManager {
            config,
            environment,
        })
    }

    /// Wrap an already-built configuration
    pub fn from_config(config: AppConfig) -> Result<ConfigManager> {
        config.validate()?;
        Ok(ConfigManager {
            config,
            environment: logging::get_environment(),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Configuration as JSON with credentials masked
    pub fn debug_config(&self) -> serde_json::Value {
        Self::sanitize_config_for_logging(&self.config)
    }

    fn build(overrides: &CliOverrides) -> Result<AppConfig> {
        let defaults = AppConfig::default();

        let mut builder = Self::with_defaults(Config::builder(), &defaults)
            .map_err(to_configuration_error)?;

        builder = match &overrides.config {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        builder = Self::with_overrides(builder, overrides).map_err(to_configuration_error)?;

        builder
            .build()
            .and_then(|config| config.try_deserialize::<AppConfig>())
            .map_err(to_configuration_error)
    }

    fn with_defaults(
        builder: ConfigBuilder<config::builder::DefaultState>,
        defaults: &AppConfig,
    ) -> std::result::Result<ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        builder
            .set_default("server.bind_address", defaults.server.bind_address.as_str())?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("database.host", defaults.database.host.as_str())?
            .set_default("database.port", i64::from(defaults.database.port))?
            .set_default("database.username", defaults.database.username.as_str())?
            .set_default("database.password", defaults.database.password.as_str())?
            .set_default("database.database", defaults.database.database.as_str())?
            .set_default("database.pool", i64::from(defaults.database.pool))?
            .set_default("fillout.base_url", defaults.fillout.base_url.as_str())?
            .set_default("fillout.form_id", defaults.fillout.form_id.as_str())?
            .set_default("fillout.secret", defaults.fillout.secret.as_str())?
            .set_default("logging.format", "pretty")
    }

    fn with_overrides(
        builder: ConfigBuilder<config::builder::DefaultState>,
        overrides: &CliOverrides,
    ) -> std::result::Result<ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        builder
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .set_override_option("fillout.secret", overrides.secret.clone())?
            .set_override_option("database.host", overrides.host.clone())?
            .set_override_option("database.username", overrides.user.clone())?
            .set_override_option("database.password", overrides.password.clone())?
            .set_override_option("database.database", overrides.database.clone())
    }

    /// Mask credential fields so the configuration can be logged
    fn sanitize_config_for_logging(config: &AppConfig) -> serde_json::Value {
        let mut config_json = serde_json::json!(config);
        let sensitive_patterns = ["password", "secret", "token"];
        Self::sanitize_json_recursive(&mut config_json, &sensitive_patterns);
        config_json
    }

    fn sanitize_json_recursive(value: &mut serde_json::Value, sensitive_patterns: &[&str]) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, val) in map.iter_mut() {
                    let key_lower = key.to_lowercase();
                    let is_sensitive = sensitive_patterns
                        .iter()
                        .any(|pattern| key_lower.contains(pattern));

                    if is_sensitive {
                        *val = match val {
                            serde_json::Value::String(s) if s.is_empty() => {
                                serde_json::Value::String("[EMPTY]".to_string())
                            }
                            _ => serde_json::Value::String("[MASKED]".to_string()),
                        };
                    } else {
                        Self::sanitize_json_recursive(val, sensitive_patterns);
                    }
                }
            }
            serde_json::Value::Array(items) => {
                for item in items {
                    Self::sanitize_json_recursive(item, sensitive_patterns);
                }
            }
            _ => {}
        }
    }
}

fn to_configuration_error(err: config::ConfigError) -> FormResponsesError {
    FormResponsesError::ConfigurationError(err.to_string())
}
