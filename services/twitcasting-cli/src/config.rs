//! Configuration types and loading
//!
//! Config path precedence: `--config` arg > CONFIG_PATH env var > default.
//! The client secret is loaded from TWITCASTING_CLIENT_SECRET or
//! `client_secret_file`, never stored in the TOML directly.

use common::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use twitcasting_auth::{AuthorizationCodeGrant, DEFAULT_BASE_URL};

pub const CLIENT_SECRET_ENV: &str = "TWITCASTING_CLIENT_SECRET";

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Registered application
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub client_id: String,
    pub callback_url: String,
    #[serde(skip)]
    pub client_secret: Option<Secret<String>>,
    /// Path to a file containing the client secret (alternative to the env var)
    #[serde(default)]
    pub client_secret_file: Option<PathBuf>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Outbound HTTP settings
#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file and resolve the client secret.
    ///
    /// Secret resolution order (blank values count as unset):
    /// 1. TWITCASTING_CLIENT_SECRET env var
    /// 2. client_secret_file path from config
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if config.app.client_id.trim().is_empty() {
            return Err(common::Error::Config("client_id must not be empty".into()));
        }
        require_http_url("base_url", &config.app.base_url)?;
        require_http_url("callback_url", &config.app.callback_url)?;
        if config.http.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        let env_secret = std::env::var(CLIENT_SECRET_ENV)
            .ok()
            .map(|secret| secret.trim().to_owned())
            .filter(|secret| !secret.is_empty());
        if let Some(secret) = env_secret {
            config.app.client_secret = Some(Secret::new(secret));
        } else if let Some(ref secret_file) = config.app.client_secret_file {
            let secret = std::fs::read_to_string(secret_file).map_err(|e| {
                common::Error::Config(format!(
                    "failed to read client_secret_file {}: {e}",
                    secret_file.display()
                ))
            })?;
            let secret = secret.trim().to_owned();
            if !secret.is_empty() {
                config.app.client_secret = Some(Secret::new(secret));
            }
        }

        if config.app.client_secret.is_none() {
            return Err(common::Error::Config(format!(
                "client secret missing: set {CLIENT_SECRET_ENV} or client_secret_file"
            )));
        }

        Ok(config)
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("twitcasting-oauth.toml")
    }

    /// Grant built from the application section.
    pub fn grant(&self) -> common::Result<AuthorizationCodeGrant> {
        let secret = self
            .app
            .client_secret
            .as_ref()
            .ok_or_else(|| common::Error::Config("client secret not loaded".into()))?;
        Ok(AuthorizationCodeGrant::new(
            self.app.client_id.clone(),
            secret.expose().clone(),
            self.app.callback_url.clone(),
        ))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

fn require_http_url(field: &str, value: &str) -> common::Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(common::Error::Config(format!(
            "{field} must start with http:// or https://, got: {value}"
        )))
    }
}
