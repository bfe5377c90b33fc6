//! Embedding generation using LLM providers.
//!
//! Thin wrapper binding a provider to one embedding model, so chunk vectors
//! and query vectors always come from the same embedding space.

use crate::provider::{Provider, ProviderError};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during embedding generation.
#[derive(Debug, Error)]
pub enum EmbedderError {
    /// The provider API returned an error.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The API response contained no embeddings.
    #[error("No embeddings returned")]
    NoEmbeddings,
}

/// Result type for embedding operations.
pub type Result<T> = std::result::Result<T, EmbedderError>;

/// Generates vector embeddings for text using a provider embedding model.
///
/// Each call is a network request; failures are propagated as-is and are not
/// retried here.
#[derive(Clone)]
pub struct Embedder {
    provider: Arc<dyn Provider>,
    model: String,
}

impl Embedder {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Generates one embedding per input text, order-preserving.
    pub async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let embeddings = self.provider.embed_batch(texts, &self.model).await?;
        if embeddings.len() != texts.len() {
            return Err(EmbedderError::NoEmbeddings);
        }
        Ok(embeddings)
    }

    /// Generates an embedding for a single query string.
    ///
    /// Uses the same model and endpoint as [`embed_batch`](Self::embed_batch),
    /// so queries are comparable with indexed chunks.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text]).await?;
        embeddings.pop().ok_or(EmbedderError::NoEmbeddings)
    }
}
