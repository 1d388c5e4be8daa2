use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::category::Category;
use crate::client::DEFAULT_BASE_URL;
use crate::scheduler::DEFAULT_REFRESH_INTERVAL_SECS;

pub const API_KEY_ENV: &str = "API_NINJAS_KEY";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub category: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub refresh_interval_secs: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            category: Some(Category::default().id().to_string()),
            api_key: None,
            base_url: None,
            refresh_interval_secs: None,
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    /// Persist a new category choice, keeping the rest of the file.
    pub fn save_category(category: Option<Category>) -> Result<()> {
        Self::save_category_to(&Self::get_config_path()?, category)
    }

    /// An unreadable file is left alone rather than replaced with defaults.
    pub fn save_category_to(path: &Path, category: Option<Category>) -> Result<()> {
        let mut config = Self::load_from(path)?;
        config.set_category(category);
        config.save_to(path)
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category.map(|c| c.id().to_string());
    }

    /// The configured category. Unknown ids count as unset.
    pub fn selected_category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::from_str)
    }

    /// API key from the environment first, then the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn refresh_interval_secs(&self) -> u64 {
        self.refresh_interval_secs
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("hourly-quote").join("config.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
