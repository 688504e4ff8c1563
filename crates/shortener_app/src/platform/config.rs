use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shortener_core::Messages;
use shortener_engine::ApiSettings;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_DATA_DIR: &str = ".shortener";

/// Client configuration, read from an optional RON file.
///
/// Fields missing from the file keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub messages: Messages,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            connect_timeout_ms: api.connect_timeout.as_millis() as u64,
            request_timeout_ms: api.request_timeout.as_millis() as u64,
            messages: Messages::default(),
        }
    }
}

impl ClientConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_ron(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_ron(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Command-line values win over the file.
    pub fn apply_overrides(&mut self, api_url: Option<String>, data_dir: Option<PathBuf>) {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }
}
