use crate::error::{LinkerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the stored API key
pub const API_KEY_ENV: &str = "FACULTY_ORACLE_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub oracle_endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub max_concurrency: usize,
    /// Interest labels scoring below this are dropped
    pub min_score: f64,
    /// Fuzzy score (0..=100) a link needs
    pub link_threshold: u8,
    /// Scraped entries at or below this relevance are discarded
    pub min_relevance: f64,
    pub max_text_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oracle_endpoint: "https://api-inference.huggingface.co/models/facebook/bart-large-mnli".into(),
            api_key: None,
            timeout_seconds: 60,
            max_concurrency: 4,
            min_score: 0.3,
            link_threshold: 80,
            min_relevance: 0.6,
            max_text_chars: 1000,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LinkerError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("faculty-linker").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(LinkerError::Config("max_concurrency must be at least 1".into()));
        }
        if self.link_threshold > 100 {
            return Err(LinkerError::Config("link_threshold must be within 0..=100".into()));
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(LinkerError::Config("min_score must be within 0..=1".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(LinkerError::Config("timeout_seconds must be positive".into()));
        }
        Ok(())
    }

    pub fn get_api_key(&self) -> Result<String> {
        // environment first
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                return Ok(key);
            }
        }

        self.api_key.clone().ok_or(LinkerError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        self.oracle_endpoint = endpoint;
        self.save()
    }
}
