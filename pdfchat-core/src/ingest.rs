//! Background document ingestion.
//!
//! Runs load → chunk → embed → index as one task, emitting a coarse stage
//! event at each boundary and a terminal completion event. The caller (the
//! session) installs the finished index only on success, so a failed
//! ingestion never disturbs whatever index was queryable before it started.

use crate::config::RagConfig;
use crate::loader::{self, LoadError};
use crate::rag::{chunker, ChunkConfig, ChunkError, Embedder, EmbedderError, IndexError, VectorIndex};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// Chunks embedded per provider request.
const EMBED_BATCH_SIZE: usize = 32;

/// Errors that can terminate an ingestion attempt.
///
/// All variants are terminal: the attempt is abandoned and the session keeps
/// its previous index (or none). The user may retry with a new file.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to load document: {0}")]
    Load(#[from] LoadError),

    #[error("failed to chunk document: {0}")]
    Chunk(#[from] ChunkError),

    #[error("embedding provider failed: {0}")]
    Embedding(#[from] EmbedderError),

    #[error("failed to build index: {0}")]
    IndexBuild(#[from] IndexError),
}

/// Coarse pipeline stages, reported as each begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Loading,
    Chunking,
    Embedding,
    Indexing,
}

impl std::fmt::Display for IngestStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IngestStage::Loading => "loading document",
            IngestStage::Chunking => "chunking text",
            IngestStage::Embedding => "embedding chunks",
            IngestStage::Indexing => "building index",
        };
        f.write_str(label)
    }
}

/// Progress notifications emitted by an ingestion task.
///
/// A sequence of [`IngestEvent::Stage`] events followed by exactly one
/// terminal [`IngestEvent::Finished`].
#[derive(Debug)]
pub enum IngestEvent {
    Stage(IngestStage),
    Finished(Result<IngestSummary, IngestError>),
}

/// What a successful ingestion produced.
#[derive(Debug, Clone)]
pub struct IngestSummary {
    pub pages: usize,
    pub chunks: usize,
}

/// Runs the full ingestion pipeline for one document.
///
/// Emits a stage event before each phase. Returns the built index so the
/// caller can install it; nothing is committed here.
pub(crate) async fn run(
    path: &Path,
    embedder: &Embedder,
    cfg: &RagConfig,
    events: &UnboundedSender<IngestEvent>,
) -> Result<(Arc<VectorIndex>, IngestSummary), IngestError> {
    let _ = events.send(IngestEvent::Stage(IngestStage::Loading));
    let document = loader::load_pdf(path)?;
    info!(source = %document.source, pages = document.pages, "document loaded");

    let _ = events.send(IngestEvent::Stage(IngestStage::Chunking));
    let chunk_cfg = ChunkConfig {
        chunk_size: cfg.chunk_size,
        chunk_overlap: cfg.chunk_overlap,
    };
    let chunks = chunker::chunk(&document.text, &document.source, &chunk_cfg)?;
    info!(chunks = chunks.len(), "document chunked");

    let _ = events.send(IngestEvent::Stage(IngestStage::Embedding));
    let mut vectors = Vec::with_capacity(chunks.len());
    for batch in chunks.chunks(EMBED_BATCH_SIZE) {
        let texts: Vec<&str> = batch.iter().map(|c| c.text.as_str()).collect();
        debug!(batch = texts.len(), "embedding batch");
        vectors.extend(embedder.embed_batch(&texts).await?);
    }

    let _ = events.send(IngestEvent::Stage(IngestStage::Indexing));
    let chunk_count = chunks.len();
    let index = VectorIndex::build(chunks, vectors)?;
    info!(chunks = chunk_count, dimension = index.dimension(), "index built");

    Ok((
        Arc::new(index),
        IngestSummary {
            pages: document.pages,
            chunks: chunk_count,
        },
    ))
}
