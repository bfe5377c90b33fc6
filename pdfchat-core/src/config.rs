use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(&'static str),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Environment variable holding the provider API key.
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Configuration for the whole engine.
///
/// Covers the generation model and the RAG processing parameters. The API key
/// is deliberately not part of the file format; see [`Credentials`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub rag: RagConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            rag: RagConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Loads configuration from a YAML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

/// Configuration for the generation model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> usize {
    1024
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Configuration for RAG processing.
///
/// Covers the embedding model and chunking/retrieval behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    /// Maximum chunk length in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per question.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    20
}

fn default_top_k() -> usize {
    4
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            embedding_model: default_embedding_model(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
        }
    }
}

/// Provider credentials, resolved once at startup.
///
/// Pipeline code never reads the environment itself; the key is looked up
/// exactly once, before any component is constructed, and a missing key is a
/// fatal startup error.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    /// Reads the API key from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(API_KEY_VAR)
    }

    fn from_env_var(name: &'static str) -> Result<Self> {
        match std::env::var(name) {
            Ok(key) if !key.trim().is_empty() => Ok(Self {
                api_key: key.trim().to_string(),
            }),
            _ => Err(ConfigError::MissingApiKey(name)),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

// Keep the key out of debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rag.chunk_size, 1000);
        assert_eq!(config.rag.chunk_overlap, 20);
        assert_eq!(config.rag.top_k, 4);
        assert!(!config.llm.model.is_empty());
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "llm:\n  model: gpt-4o-mini\n  base_url: https://api.openai.com/v1\n  temperature: 0.2\n  max_tokens: 256\nrag:\n  embedding_model: text-embedding-3-large\n  chunk_size: 800\n  chunk_overlap: 40\n  top_k: 6"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.rag.chunk_size, 800);
        assert_eq!(config.rag.top_k, 6);
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "llm:\n  model: gpt-4o-mini").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.rag.chunk_size, 1000);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/config.yaml");
        assert_eq!(config.rag.chunk_size, 1000);
    }

    #[test]
    fn test_credentials_missing() {
        let err = Credentials::from_env_var("PDFCHAT_TEST_KEY_UNSET").unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }

    #[test]
    fn test_credentials_present() {
        std::env::set_var("PDFCHAT_TEST_KEY_SET", "sk-test ");
        let credentials = Credentials::from_env_var("PDFCHAT_TEST_KEY_SET").unwrap();
        assert_eq!(credentials.api_key(), "sk-test");
    }
}
