use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use jobboard_engine::{FetchSettings, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

use crate::logging::LogDestination;

pub const API_BASE_URL_ENV: &str = "JOBBOARD_API_BASE_URL";

/// Controller settings, read from a RON file. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub search_debounce_ms: u64,
    pub favorites_key: String,
    pub store_path: PathBuf,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: Option<u64>,
    pub max_response_bytes: u64,
    pub tick_interval_ms: u64,
    pub log_destination: LogDestination,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_base_url: fetch.base_url,
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: 500,
            favorites_key: "jobFavorites".to_string(),
            store_path: PathBuf::from(".jobboard_state.ron"),
            connect_timeout_ms: 10_000,
            request_timeout_ms: None,
            max_response_bytes: fetch.max_bytes,
            tick_interval_ms: 75,
            log_destination: LogDestination::Terminal,
        }
    }
}

impl ControllerConfig {
    /// Reads `path`, then applies environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = ron::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config.with_env_overrides())
    }

    /// Defaults plus environment overrides, for hosts without a config file.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        self
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
            max_bytes: self.max_response_bytes,
        }
    }
}
