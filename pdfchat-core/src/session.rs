//! Process-wide session state and the two outward entry points.
//!
//! A session is created once at startup with a validated config and
//! credentials. It owns the provider handle and a single index slot that
//! moves through absent → building → ready → replaced as documents are
//! ingested. Both entry points spawn their work on background tasks so the
//! caller is never blocked on network I/O.

use crate::answer;
use crate::config::{Config, Credentials};
use crate::ingest::{self, IngestEvent};
use crate::provider::{OpenAiProvider, Provider};
use crate::rag::{Embedder, VectorIndex};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tokio::sync::{mpsc, oneshot};
use tracing::info;

/// Session over one (optional) indexed document and a generation model.
///
/// Cloning is cheap and all clones share the same index slot.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: Config,
    provider: Arc<dyn Provider>,
    embedder: Embedder,
    /// The index slot. Readers clone the `Arc` once and use that snapshot;
    /// writers replace the whole `Option` in one swap. The lock is never
    /// held across an await.
    index: RwLock<Option<Arc<VectorIndex>>>,
}

impl Session {
    /// Creates a session backed by an OpenAI-compatible provider.
    ///
    /// The provider handle is built once here; credentials are already
    /// validated, so nothing below this point touches the environment.
    pub fn new(config: Config, credentials: &Credentials) -> Self {
        let provider: Arc<dyn Provider> = Arc::new(OpenAiProvider::new(
            config.llm.base_url.clone(),
            credentials.api_key(),
        ));
        Self::with_provider(config, provider)
    }

    /// Creates a session with a caller-supplied provider.
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>) -> Self {
        let embedder = Embedder::new(provider.clone(), config.rag.embedding_model.clone());
        Self {
            inner: Arc::new(SessionInner {
                config,
                provider,
                embedder,
                index: RwLock::new(None),
            }),
        }
    }

    /// Starts ingesting a document on a background task.
    ///
    /// Returns the event stream: stage notifications followed by one terminal
    /// [`IngestEvent::Finished`]. On success the new index atomically
    /// replaces the current one; on failure the previous index (or absence)
    /// is left untouched.
    pub fn load_document(&self, path: impl Into<PathBuf>) -> mpsc::UnboundedReceiver<IngestEvent> {
        let path = path.into();
        let inner = self.inner.clone();
        let (events, receiver) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let result = ingest::run(&path, &inner.embedder, &inner.config.rag, &events).await;
            let outcome = match result {
                Ok((index, summary)) => {
                    inner.install(index);
                    info!(path = %path.display(), chunks = summary.chunks, "index ready");
                    Ok(summary)
                }
                Err(e) => Err(e),
            };
            let _ = events.send(IngestEvent::Finished(outcome));
        });

        receiver
    }

    /// Starts answering a question on a background task.
    ///
    /// The index reference is snapshotted once at task start, so an ingestion
    /// finishing mid-answer cannot affect this call. Resolves to the answer
    /// text in every case; failures arrive as a user-facing message, never as
    /// a dropped channel.
    pub fn ask_question(&self, question: impl Into<String>) -> oneshot::Receiver<String> {
        let question = question.into();
        let inner = self.inner.clone();
        let (sender, receiver) = oneshot::channel();

        tokio::spawn(async move {
            let snapshot = inner.snapshot();
            let answer = answer::run(
                &question,
                snapshot,
                &inner.embedder,
                &inner.provider,
                &inner.config.llm,
                &inner.config.rag,
            )
            .await;
            let _ = sender.send(answer);
        });

        receiver
    }

    /// Whether a document has been ingested and is queryable.
    pub fn has_index(&self) -> bool {
        self.inner.snapshot().is_some()
    }

    /// Number of chunks in the current index, if any.
    pub fn chunk_count(&self) -> Option<usize> {
        self.inner.snapshot().map(|index| index.len())
    }
}

impl SessionInner {
    fn snapshot(&self) -> Option<Arc<VectorIndex>> {
        self.index.read().unwrap().clone()
    }

    fn install(&self, index: Arc<VectorIndex>) {
        *self.index.write().unwrap() = Some(index);
    }
}
