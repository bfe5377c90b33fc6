//! Retrieval components: chunking, embedding, and the vector index.
//!
//! The ingestion pipeline feeds a [`Document`](crate::loader::Document)
//! through [`chunker`], embeds each chunk via [`Embedder`], and builds an
//! immutable [`VectorIndex`]. The answer pipeline embeds the question with
//! the same [`Embedder`] and searches the index.

pub mod chunker;
pub mod embedder;
pub mod index;
mod types;

pub use chunker::{ChunkConfig, ChunkError};
pub use embedder::{Embedder, EmbedderError};
pub use index::{IndexError, SearchError, VectorIndex};
pub use types::{Chunk, ScoredChunk};
