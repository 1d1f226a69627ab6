//!
//! _Config builder_
//!
//! Resolves the base URL the translation client talks to
//!

use std::env;

use log::{info, warn};
use thiserror::Error;

/// Base URL used outside production builds
pub const DEFAULT_DEV_BASE_URL: &str = "http://localhost:8000/api";

/// Variable holding the public base URL for production builds
pub const BASE_URL_VAR: &str = "PUBLIC_API_BASE_URL";

/// Variable overriding the build mode
pub const MODE_VAR: &str = "APP_ENV";

/// Errors for the Config Builder
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PUBLIC_API_BASE_URL must be set for production builds")]
    /// Production mode without a public base URL
    MissingBaseUrl,
}

/// Which endpoint set to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    ///Local backend
    #[default]
    Development,
    ///Deployed backend
    Production,
}

impl BuildMode {
    /// Mode of the running build: `Production` when compiled without debug assertions
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    /// Parse an `APP_ENV` style value
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(BuildMode::Production),
            "development" | "dev" => Some(BuildMode::Development),
            _ => None,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    ///Root under which `/translate` and `/languages` live
    pub base_url: String,
    ///Mode the URL was resolved for
    pub mode: BuildMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DEV_BASE_URL.to_string(),
            mode: BuildMode::Development,
        }
    }
}

impl Config {
    /// Return the development defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve from the process environment.
    ///
    /// Loads `.env` if present. The mode comes from `APP_ENV` when it is set to a known value,
    /// otherwise from the build profile.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mode = match env::var(MODE_VAR) {
            Ok(value) => BuildMode::parse(&value).unwrap_or_else(|| {
                warn!("Ignoring unknown {MODE_VAR} value `{value}`");
                BuildMode::current()
            }),
            Err(_) => BuildMode::current(),
        };

        let config = Self::resolve(mode, env::var(BASE_URL_VAR).ok())?;
        info!("Using {:?} backend at {}", config.mode, config.base_url);
        Ok(config)
    }

    /// Pick the base URL for `mode`. `public_base_url` is only read in production.
    pub fn resolve(mode: BuildMode, public_base_url: Option<String>) -> Result<Self, ConfigError> {
        match mode {
            BuildMode::Development => Ok(Self::new()),
            BuildMode::Production => match public_base_url {
                Some(url) if !url.trim().is_empty() => Ok(Self::new()
                    .base_url(url.trim())
                    .mode(BuildMode::Production)
                    .build()),
                _ => Err(ConfigError::MissingBaseUrl),
            },
        }
    }

    /// Root URL of the backend, a trailing `/` is dropped
    pub fn base_url<S: Into<String>>(&mut self, url: S) -> &mut Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    ///Mode to record
    pub fn mode(&mut self, mode: BuildMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Build the config
    pub fn build(&self) -> Self {
        self.clone()
    }
}

#[test]
fn test_development_ignores_public_url() {
    let cfg = Config::resolve(
        BuildMode::Development,
        Some("https://api.example.com".to_string()),
    )
    .unwrap();
    assert_eq!(cfg.base_url, DEFAULT_DEV_BASE_URL);
    assert_eq!(cfg.mode, BuildMode::Development);
}

#[test]
fn test_production_uses_public_url() {
    let cfg = Config::resolve(
        BuildMode::Production,
        Some("https://api.example.com/api/".to_string()),
    )
    .unwrap();
    assert_eq!(cfg.base_url, "https://api.example.com/api");
    assert_eq!(cfg.mode, BuildMode::Production);
}

#[test]
fn test_production_requires_public_url() {
    assert_eq!(
        Config::resolve(BuildMode::Production, None),
        Err(ConfigError::MissingBaseUrl)
    );
    assert_eq!(
        Config::resolve(BuildMode::Production, Some("  ".to_string())),
        Err(ConfigError::MissingBaseUrl)
    );
}

#[test]
fn test_parse_mode() {
    assert_eq!(BuildMode::parse("PROD"), Some(BuildMode::Production));
    assert_eq!(BuildMode::parse(" development "), Some(BuildMode::Development));
    assert_eq!(BuildMode::parse("staging"), None);
}

#[test]
fn test_builder_trims_trailing_slash() {
    let cfg = Config::new().base_url("http://127.0.0.1:9000/api//").build();
    assert_eq!(cfg.base_url, "http://127.0.0.1:9000/api");
    assert_eq!(cfg.mode, BuildMode::Development);
}
