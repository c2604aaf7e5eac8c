use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.appstoreconnect.apple.com";
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

pub const ENV_APP_ID: &str = "ASC_APP_ID";
pub const ENV_TOKEN: &str = "ASC_TOKEN";
pub const ENV_API_BASE: &str = "ASC_API_BASE";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Connection settings, read from a JSON file and overridden by environment.
///
/// ```json
/// { "appId": "1234567890", "token": "eyJ...", "pacingMs": 100 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub app_id: String,
    /// Pre-signed App Store Connect bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pacing_ms: Option<u64>,
}

impl Config {
    /// Load `path` (if present) and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    pub fn load_with_env<F>(path: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            let data = std::fs::read_to_string(path)?;
            serde_json::from_str(&data)?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using environment only");
            Config::default()
        };

        let var = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if let Some(app_id) = var(ENV_APP_ID) {
            config.app_id = app_id;
        }
        if let Some(token) = var(ENV_TOKEN) {
            config.token = Some(token);
        }
        if let Some(base) = var(ENV_API_BASE) {
            config.api_base = Some(base);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(CoreError::MissingConfig("appId"));
        }
        if self.token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(CoreError::MissingConfig("token"));
        }
        if let Some(base) = &self.api_base {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(CoreError::InvalidConfig(format!(
                    "apiBase must be an http(s) URL, got '{base}'"
                )));
            }
        }
        Ok(())
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or_default()
    }

    pub fn pacing(&self) -> Duration {
        self.pacing_ms
            .map(Duration::from_millis)
            .unwrap_or(crate::batch::DEFAULT_PACING)
    }
}
