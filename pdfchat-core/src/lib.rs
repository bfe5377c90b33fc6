//! pdfchat-core - RAG engine for chatting with a single PDF
//!
//! Provides the pipeline behind a "load a PDF, ask it questions" application:
//! - PDF loading and per-page text extraction
//! - Recursive text chunking and embedding via an external provider
//! - In-memory vector index with cosine-similarity retrieval
//! - Background ingestion and answering pipelines
//!
//! ## Primary API
//!
//! Construct a [`Session`] once at startup, then drive it through its two
//! entry points: [`Session::load_document`] and [`Session::ask_question`].

// Public modules
pub mod answer;
pub mod config;
pub mod ingest;
pub mod loader;
pub mod provider;
pub mod rag;
pub mod session;

// Public exports
pub use config::{Config, ConfigError, Credentials, LlmConfig, RagConfig};
pub use ingest::{IngestError, IngestEvent, IngestStage, IngestSummary};
pub use loader::{Document, LoadError};
pub use rag::{Chunk, ScoredChunk, VectorIndex};
pub use session::Session;

// Provider exports
pub use provider::{ChatRequest, Message, OpenAiProvider, Provider, ProviderError};

#[cfg(test)]
pub(crate) mod test_support;
