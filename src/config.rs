use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

const STORE_URL_ENV: &str = "PRICEBOOK_STORE_URL";
const DEFAULT_STORE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_store_url")]
    pub store_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
        }
    }
}

impl Config {
    /// The environment override wins over the config file, which wins over
    /// the built-in default.
    pub fn load() -> Result<Self> {
        if let Ok(url) = std::env::var(STORE_URL_ENV) {
            if !url.trim().is_empty() {
                return Ok(Self { store_url: url });
            }
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::from_path(&path);
            }
        }

        Ok(Self::default())
    }

    fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "pricebook", "pricebook")
        .map(|dirs| dirs.config_dir().join("config.json"))
}
