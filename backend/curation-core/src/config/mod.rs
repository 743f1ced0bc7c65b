use crate::error::config::ConfigError;
use crate::{IMPORTER_SERVICE_BASE_URL, IMPORTER_SERVICE_URL_ENV};

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Humantime duration, e.g. `"30s"` or `"1m 30s"`.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurationConfig {
    /// How long the domain catalog load keeps retrying transient failures.
    #[serde(default = "default_domain_retry_max_elapsed")]
    pub domain_retry_max_elapsed: String,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            domain_retry_max_elapsed: default_domain_retry_max_elapsed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub curation: CurationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            service: ServiceConfig::default(),
            curation: CurationConfig::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_base_url() -> String {
    IMPORTER_SERVICE_BASE_URL.to_string()
}
fn default_request_timeout() -> String {
    "30s".to_string()
}
fn default_domain_retry_max_elapsed() -> String {
    "5s".to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

#[track_caller]
fn parse_positive_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidDuration {
        location: ErrorLocation::from(Location::caller()),
        field,
        value: value.to_string(),
        reason,
    };

    let duration = humantime::parse_duration(value).map_err(|e| invalid(e.to_string()))?;

    if duration.is_zero() {
        return Err(invalid(String::from("must be greater than zero")));
    }

    Ok(duration)
}

impl ServiceConfig {
    /// Parsed request timeout.
    #[track_caller]
    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        parse_positive_duration("request_timeout", &self.request_timeout)
    }
}

impl CurationConfig {
    /// Parsed retry window for the domain catalog load.
    #[track_caller]
    pub fn domain_retry_max_elapsed(&self) -> Result<Duration, ConfigError> {
        parse_positive_duration("domain_retry_max_elapsed", &self.domain_retry_max_elapsed)
    }
}

impl AppConfig {
    /// Load config from {config_dir}/config.json.
    ///
    /// # Returns
    ///
    /// Returns `Ok(AppConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: AppConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Replace the service base URL with `KDB_API_URL` when it is set.
    ///
    /// A `.env` file in the working directory is loaded first (missing file is fine).
    /// The overridden config is validated again.
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded .env from: {}", path.display()),
            Err(e) => debug!("No .env loaded: {}", e),
        }

        match env::var(IMPORTER_SERVICE_URL_ENV) {
            Ok(url) => {
                info!("Service base URL overridden by {IMPORTER_SERVICE_URL_ENV}");
                self.service.base_url = url;
                self.validate()?;
            }
            Err(env::VarError::NotPresent) => {}
            Err(env::VarError::NotUnicode(_)) => {
                warn!("Env var {IMPORTER_SERVICE_URL_ENV} contains invalid unicode, ignoring");
            }
        }

        Ok(self)
    }

    /// Save config to {config_dir}/config.json using atomic write.
    ///
    /// Uses temp file + rename so a crash mid-write never leaves a truncated file.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Path of the config file inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        let url = &self.service.base_url;
        if url.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "service.base_url cannot be empty string".to_string(),
            });
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid URL format: {}", url),
            });
        }

        self.service.request_timeout()?;
        self.curation.domain_retry_max_elapsed()?;

        Ok(())
    }
}
