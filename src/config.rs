//! Configuration management for the assessment recommender

use crate::error::{RecommenderError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub embedding: EmbeddingConfig,
    pub data: DataConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Remote API credential, read from the OPENAI_API_KEY environment
    /// variable at load time. Never written to the config file.
    #[serde(skip)]
    pub api_key: Option<String>,
    pub remote_endpoint: String,
    pub remote_model: String,
    pub remote_dimensions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_model_dir: Option<PathBuf>,
    pub local_dimensions: usize,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub catalog_file: String,
    pub snapshot_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_top_k: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("assessment-recommender");

        Self {
            embedding: EmbeddingConfig::default(),
            data: DataConfig {
                data_dir,
                catalog_file: "assessments.json".to_string(),
                snapshot_file: "embeddings.json".to_string(),
            },
            search: SearchConfig { default_top_k: 10 },
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            remote_endpoint: "https://api.openai.com/v1/embeddings".to_string(),
            remote_model: "text-embedding-3-large".to_string(),
            remote_dimensions: 3072,
            local_model_dir: None,
            local_dimensions: 256,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| {
                RecommenderError::Configuration(format!("Failed to parse config: {e}"))
            })?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };

        if config.embedding.api_key.is_none() {
            config.embedding.api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            RecommenderError::Configuration(format!("Failed to serialize config: {e}"))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("assessment-recommender")
            .join("config.toml")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.catalog_file)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.snapshot_file)
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> std::result::Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {format}. Supported: console, json, markdown"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search.default_top_k, 10);
        assert_eq!(config.embedding.remote_dimensions, 3072);
        assert!(config.embedding.api_key.is_none());
        assert!(config.catalog_path().ends_with("assessments.json"));
    }

    #[test]
    fn test_toml_roundtrip_omits_api_key() {
        let mut config = Config::default();
        config.embedding.api_key = Some("secret".to_string());

        let serialized = toml::to_string_pretty(&config).unwrap();
        assert!(!serialized.contains("secret"));

        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert!(parsed.embedding.api_key.is_none());
        assert_eq!(parsed.search.default_top_k, 10);
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("json").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("pdf").is_err());
    }
}
