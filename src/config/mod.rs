// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file. Values from the
//! file can be overridden by environment variables, which are also read from a
//! `.env` file when one is present.

use std::{
    fs,
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "coursefinder";

const ENV_API_BASE_URL: &str = "COURSEFINDER_API_BASE_URL";
const ENV_SEARCH_HOST: &str = "COURSEFINDER_SEARCH_HOST";
const ENV_SEARCH_KEY: &str = "COURSEFINDER_SEARCH_KEY";
const ENV_BETA: &str = "COURSEFINDER_BETA";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,

    /// Base URL of the CourseFinder API, the local database is used when unset.
    pub(crate) api_base_url: Option<String>,
    pub(crate) search_host: Option<String>,
    pub(crate) search_key: Option<String>,
    pub(crate) beta: bool,

    /// Database file name, relative to the configuration directory.
    pub(crate) database_file: String,

    pub(crate) history_limit: usize,
    pub(crate) worker_threads: usize,
    pub(crate) tick_ms: u64,
    pub(crate) debounce_ms: u64,
    pub(crate) cache_stale_after_ms: u64,
    pub(crate) http_timeout_secs: u64,
    pub(crate) page_size: usize,

    pub(crate) username: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api_base_url: None,
            search_host: None,
            search_key: None,
            beta: false,
            database_file: "coursefinder.db".to_string(),
            history_limit: 10,
            worker_threads: 2,
            tick_ms: 100,
            debounce_ms: 300,
            cache_stale_after_ms: 60_000,
            http_timeout_secs: 10,
            page_size: 10,
            username: None,
        }
    }
}

impl AppConfig {
    /// Applies overrides from `var`, usually the process environment.
    pub(crate) fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(ENV_API_BASE_URL) {
            self.api_base_url = Some(url);
        }
        if let Some(host) = var(ENV_SEARCH_HOST) {
            self.search_host = Some(host);
        }
        if let Some(key) = var(ENV_SEARCH_KEY) {
            self.search_key = Some(key);
        }
        if let Some(beta) = var(ENV_BETA) {
            self.beta = matches!(beta.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    pub(crate) fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub(crate) fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub(crate) fn cache_stale_after(&self) -> Duration {
        Duration::from_millis(self.cache_stale_after_ms)
    }

    pub(crate) fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Directory holding the configuration file, the database and the logs.
    pub(crate) fn data_dir(&self) -> anyhow::Result<PathBuf> {
        let config_file = confy::get_configuration_file_path(CONFIG_NAME, None)
            .context("Failed to locate configuration directory")?;
        let dir = config_file
            .parent()
            .map(PathBuf::from)
            .context("Configuration file has no parent directory")?;

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        Ok(dir)
    }

    pub(crate) fn database_path(&self) -> anyhow::Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.database_file))
    }
}

/// Loads the configuration file, then applies environment overrides.
///
/// A missing or unreadable file yields the defaults.
pub(crate) fn load_config() -> AppConfig {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("no .env file loaded: {e}");
    }

    let mut config: AppConfig = confy::load(CONFIG_NAME, None).unwrap_or_else(|e| {
        tracing::warn!("failed to load configuration, using defaults: {e}");
        AppConfig::default()
    });

    config.apply_overrides(|name| std::env::var(name).ok());
    config
}

pub(crate) fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::default();

        assert_eq!(config.worker_threads, 2);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.cache_stale_after(), Duration::from_secs(60));
        assert!(config.api_base_url.is_none());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = AppConfig {
            search_host: Some("http://file".into()),
            ..AppConfig::default()
        };

        config.apply_overrides(|name| match name {
            ENV_SEARCH_HOST => Some("http://env".into()),
            ENV_BETA => Some("TRUE".into()),
            _ => None,
        });

        assert_eq!(config.search_host.as_deref(), Some("http://env"));
        assert!(config.beta);
        assert!(config.api_base_url.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: AppConfig =
            serde_json::from_value(serde_json::json!({ "worker_threads": 4 })).unwrap();

        assert_eq!(config.worker_threads, 4);
        assert_eq!(config.tick_ms, 100);
    }
}
