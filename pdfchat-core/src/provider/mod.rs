//! LLM provider abstraction layer.
//!
//! This module defines a common interface for chat completions and
//! embeddings, implemented for OpenAI-compatible HTTP backends.

mod types;
pub mod openai;

// Re-export common types
pub use types::{ChatRequest, Message, Provider, ProviderError, Result};

// Re-export provider implementations
pub use openai::OpenAiProvider;
