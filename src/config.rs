//! Client configuration.
//!
//! Stored in `.issuedesk/config.yaml`:
//! - Backend base URL
//! - API token
//! - Request timeout
//!
//! Environment variables `ISSUEDESK_API_URL` and `ISSUEDESK_TOKEN` take
//! precedence over the file.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DeskError, Result};
use crate::types::CONFIG_DIR;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Backend API settings
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the tracker backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Bearer token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_DIR).join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Backend base URL from environment variable or config file
    pub fn api_url(&self) -> Option<String> {
        if let Ok(url) = env::var("ISSUEDESK_API_URL")
            && !url.is_empty()
        {
            return Some(url);
        }

        self.api.url.clone()
    }

    /// API token from environment variable or config file
    pub fn token(&self) -> Option<String> {
        if let Ok(token) = env::var("ISSUEDESK_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }

        self.api.token.clone()
    }

    /// Set the backend base URL, validating it parses as an absolute URL
    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        Url::parse(url)
            .map_err(|e| DeskError::Config(format!("invalid API URL '{}': {}", url, e)))?;
        self.api.url = Some(url.trim_end_matches('/').to_string());
        Ok(())
    }

    /// Set the API token
    pub fn set_token(&mut self, token: String) {
        self.api.token = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api.url.is_none());
        assert!(config.api.token.is_none());
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.set_api_url("http://localhost:8080/api/").unwrap();
        config.set_token("tk_test123".to_string());

        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let parsed: Config = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(parsed.api.url.as_deref(), Some("http://localhost:8080/api"));
        assert_eq!(parsed.api.token.as_deref(), Some("tk_test123"));
    }

    #[test]
    fn test_set_api_url_rejects_garbage() {
        let mut config = Config::default();
        assert!(config.set_api_url("not a url").is_err());
        assert!(config.api.url.is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut config = Config::default();
        config.set_token("tk_secret".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("tk_secret"));
        assert!(debug.contains("REDACTED"));
    }
}
