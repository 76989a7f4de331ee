//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\liner-notes\config.toml
//! - macOS: ~/Library/Application Support/liner-notes/config.toml
//! - Linux: ~/.config/liner-notes/config.toml
//!
//! A different file can be passed with `--config`. Environment variables
//! (`PORT`, `DATABASE_URL`, `MUSICBRAINZ_CONTACT`, ...) are applied on top of
//! whatever the file provides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub musicbrainz: MusicBrainzConfig,
    pub wikipedia: WikipediaConfig,
    pub discogs: DiscogsConfig,
    pub resolver: ResolverConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin allowed by CORS (the frontend dev server)
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origin: "http://localhost:4200".to_string(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which storage engine backs the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    #[default]
    Sqlite,
    Memory,
}

impl std::str::FromStr for DatabaseDriver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(DatabaseDriver::Sqlite),
            "memory" => Ok(DatabaseDriver::Memory),
            other => Err(ConfigError::UnsupportedDriver(other.to_string())),
        }
    }
}

/// Persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub driver: DatabaseDriver,
    /// SQLite connection URL (ignored by the memory driver)
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            driver: DatabaseDriver::Sqlite,
            url: crate::db::db_url(None),
        }
    }
}

/// MusicBrainz client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicBrainzConfig {
    pub base_url: String,
    pub app_name: String,
    pub app_version: String,
    /// Contact address sent in the User-Agent, required by MusicBrainz
    pub contact: String,
    pub timeout_secs: u64,
    /// Minimum spacing between requests (MusicBrainz allows 1 req/sec)
    pub min_request_interval_ms: u64,
}

impl Default for MusicBrainzConfig {
    fn default() -> Self {
        Self {
            base_url: "https://musicbrainz.org/ws/2".to_string(),
            app_name: "liner-notes".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            contact: "dev@localhost".to_string(),
            timeout_secs: 6,
            min_request_interval_ms: 1000,
        }
    }
}

/// Wikipedia client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikipediaConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org/api/rest_v1".to_string(),
            user_agent: concat!("LinerNotes/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

/// Discogs client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscogsConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Personal access token (preferred over consumer key/secret)
    pub token: Option<String>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
}

impl Default for DiscogsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.discogs.com".to_string(),
            user_agent: concat!("LinerNotes/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            token: None,
            consumer_key: None,
            consumer_secret: None,
        }
    }
}

/// Orchestration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Deadline applied to every upstream call
    pub upstream_timeout_secs: u64,
    /// How many release groups to list for a new artist
    pub release_page_size: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            upstream_timeout_secs: 15,
            release_page_size: 50,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("liner-notes"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk, then apply environment overrides.
///
/// A missing or unparsable file falls back to defaults with a logged warning.
/// Bad environment values are reported as errors since they were set on purpose.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(path) => load_file(&path),
        None => {
            tracing::warn!("Could not determine config directory, using defaults");
            Config::default()
        }
    };

    config.apply_env(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn load_file(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

impl Config {
    /// Apply environment overrides using the given lookup.
    ///
    /// Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(port) = get("PORT").or_else(|| get("HTTP_PORT")) {
            self.server.port = parse_port(&port)?;
        }
        if let Some(driver) = get("DATABASE_DRIVER") {
            self.database.driver = driver.parse()?;
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(base_url) = get("MUSICBRAINZ_BASE_URL") {
            self.musicbrainz.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get("MUSICBRAINZ_TIMEOUT_SECONDS") {
            let secs = parse_number("MUSICBRAINZ_TIMEOUT_SECONDS", &raw)?;
            if secs > 0 {
                self.musicbrainz.timeout_secs = secs;
            }
        }
        if let Some(name) = get("MUSICBRAINZ_APP_NAME") {
            self.musicbrainz.app_name = name;
        }
        if let Some(version) = get("MUSICBRAINZ_APP_VERSION") {
            self.musicbrainz.app_version = version;
        }
        if let Some(contact) = get("MUSICBRAINZ_CONTACT") {
            self.musicbrainz.contact = contact;
        }
        if let Some(token) = get("DISCOGS_TOKEN") {
            self.discogs.token = Some(token);
        }
        if let Some(key) = get("DISCOGS_CONSUMER_KEY") {
            self.discogs.consumer_key = Some(key);
        }
        if let Some(secret) = get("DISCOGS_CONSUMER_SECRET") {
            self.discogs.consumer_secret = Some(secret);
        }
        Ok(())
    }

    /// Check settings that cannot be defaulted
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.driver == DatabaseDriver::Sqlite && self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "database url required for sqlite driver".to_string(),
            ));
        }
        if self.musicbrainz.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "musicbrainz base url is required".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// Accepts `8080`, `:8080` or `host:8080` and keeps the port
fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let port = raw.rsplit(':').next().unwrap_or(raw).trim();
    port.parse().map_err(|_| ConfigError::InvalidValue {
        key: "PORT".to_string(),
        value: raw.to_string(),
    })
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Unsupported database driver {0:?}")]
    UnsupportedDriver(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[database]"));
        assert!(toml.contains("[musicbrainz]"));
        assert!(toml.contains("[resolver]"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.driver, DatabaseDriver::Sqlite);
        assert_eq!(config.musicbrainz.timeout_secs, 6);
        assert_eq!(config.resolver.release_page_size, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[database]
driver = "memory"

[discogs]
token = "abc"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.database.driver, DatabaseDriver::Memory);
        assert_eq!(config.discogs.token.as_deref(), Some("abc"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.wikipedia.timeout_secs, 10);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env(env(&[
                ("HTTP_PORT", "9090"),
                ("DATABASE_DRIVER", "Memory"),
                ("MUSICBRAINZ_BASE_URL", "http://mb.local/ws/2/"),
                ("MUSICBRAINZ_TIMEOUT_SECONDS", "12"),
                ("MUSICBRAINZ_CONTACT", "ops@example.com"),
                ("DISCOGS_TOKEN", "  "),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.driver, DatabaseDriver::Memory);
        assert_eq!(config.musicbrainz.base_url, "http://mb.local/ws/2");
        assert_eq!(config.musicbrainz.timeout_secs, 12);
        assert_eq!(config.musicbrainz.contact, "ops@example.com");
        assert!(config.discogs.token.is_none());
    }

    #[test]
    fn test_port_prefers_port_over_http_port() {
        let mut config = Config::default();
        config
            .apply_env(env(&[("PORT", "127.0.0.1:7000"), ("HTTP_PORT", "9090")]))
            .unwrap();
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    fn test_invalid_env_values() {
        let mut config = Config::default();
        let err = config.apply_env(env(&[("PORT", "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = config
            .apply_env(env(&[("DATABASE_DRIVER", "postgres")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedDriver(_)));

        let err = config
            .apply_env(env(&[("MUSICBRAINZ_TIMEOUT_SECONDS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("MUSICBRAINZ_TIMEOUT_SECONDS"));
    }

    #[test]
    fn test_validate_requires_sqlite_url() {
        let mut config = Config::default();
        config.database.url = String::new();
        assert!(config.validate().is_err());

        config.database.driver = DatabaseDriver::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_file(&dir.path().join("nope.toml"));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 3000\n").unwrap();

        let config = load_file(&path);
        assert_eq!(config.server.port, 3000);
    }
}
