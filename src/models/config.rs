use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PROVIDER_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_DIMENSION: u32 = 1536;
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.8;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pdfqa").join("config.toml"))
    }

    pub fn load() -> Result<Self, crate::error::ConfigError> {
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }
        Ok(Self::default())
    }

    pub fn save(&self) -> Result<PathBuf, crate::error::ConfigError> {
        let path = Self::config_path().ok_or_else(|| {
            crate::error::ConfigError::PathError("could not determine config directory".to_string())
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

/// Settings for the embedding/completion provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_url")]
    pub base_url: String,

    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Dimensionality of vectors produced by the embedding model.
    #[serde(default = "default_dimension")]
    pub dimension: u32,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_provider_url() -> String {
    DEFAULT_PROVIDER_URL.to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

fn default_dimension() -> u32 {
    DEFAULT_EMBEDDING_DIMENSION
}

fn default_timeout() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            embedding_model: default_embedding_model(),
            chat_model: default_chat_model(),
            dimension: default_dimension(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Overrides the default database location under the user data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn database_path(&self) -> Result<PathBuf, crate::error::ConfigError> {
        if let Some(ref path) = self.path {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|p| p.join("pdfqa").join("pdfqa.sqlite"))
            .ok_or_else(|| {
                crate::error::ConfigError::PathError(
                    "could not determine data directory".to_string(),
                )
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum PDF size accepted for ingestion.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Page embeddings issued concurrently during ingestion.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: u32,

    /// Page text is truncated to this many characters before embedding,
    /// per the provider's input limit.
    #[serde(default = "default_max_embed_chars")]
    pub max_embed_chars: u32,
}

fn default_max_file_size() -> u64 {
    50 * 1024 * 1024
}

fn default_max_concurrency() -> u32 {
    4
}

fn default_max_embed_chars() -> u32 {
    24_000
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            max_concurrency: default_max_concurrency(),
            max_embed_chars: default_max_embed_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Minimum cosine similarity for a page to ground an answer.
    /// Biased toward precision over recall.
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f32,
}

fn default_relevance_threshold() -> f32 {
    DEFAULT_RELEVANCE_THRESHOLD
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            relevance_threshold: default_relevance_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.provider.base_url, DEFAULT_PROVIDER_URL);
        assert_eq!(config.provider.embedding_model, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.provider.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.provider.dimension, 1536);
        assert_eq!(config.retrieval.relevance_threshold, 0.8);
    }

    #[test]
    fn test_config_path() {
        let path = Config::config_path();
        assert!(path.is_some());
    }

    #[test]
    fn test_ingest_config_default() {
        let config = IngestConfig::default();
        assert!(config.max_concurrency >= 1);
        assert!(config.max_embed_chars > 0);
    }

    #[test]
    fn test_store_path_override() {
        let config = StoreConfig {
            path: Some(PathBuf::from("/tmp/custom.sqlite")),
        };
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/custom.sqlite")
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[retrieval]\nrelevance_threshold = 0.5\n").unwrap();
        assert_eq!(config.retrieval.relevance_threshold, 0.5);
        assert_eq!(config.provider.dimension, DEFAULT_EMBEDDING_DIMENSION);
    }
}
