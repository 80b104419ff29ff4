//! Configuration loaded from `detailops.toml`.
//!
//! [`DetailOpsConfig`] holds every configurable parameter. Values missing
//! from the file use sensible defaults. The `DETAILOPS_API_TOKEN` environment
//! variable takes precedence over the file for the store token.

use std::path::Path;

use serde::Deserialize;

use crate::error::DetailOpsError;

/// Top-level configuration loaded from `detailops.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailOpsConfig {
    /// Base URL of the remote workshop store API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token passed through to the store. Not validated locally.
    #[serde(default)]
    pub api_token: String,
}

// Default store endpoint for a local deployment.
fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

impl Default for DetailOpsConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_token: String::new(),
        }
    }
}

impl DetailOpsConfig {
    /// Loads configuration from `detailops.toml` in the current directory,
    /// falling back to defaults if the file does not exist.
    pub fn load() -> Result<Self, DetailOpsError> {
        Self::load_from(Path::new("detailops.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self, DetailOpsError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<DetailOpsConfig>(&contents)?
        } else {
            Self::default()
        };

        // Environment variable takes precedence over the file for the token.
        if let Ok(token) = std::env::var("DETAILOPS_API_TOKEN")
            && !token.is_empty()
        {
            config.api_token = token;
        }

        Ok(config)
    }
}
