//! Question answering with retrieval-augmented prompts.
//!
//! Retrieves relevant chunks when an index exists, folds them into the
//! prompt, and asks the generation model. The outward contract is "always
//! returns a string": any failure along the way becomes a user-facing
//! message instead of an error, unlike ingestion's strict failure model.

use crate::config::{LlmConfig, RagConfig};
use crate::provider::{ChatRequest, Message, Provider, ProviderError};
use crate::rag::{Embedder, EmbedderError, SearchError, VectorIndex};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
enum AnswerError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbedderError),

    #[error("retrieval failed: {0}")]
    Retrieval(#[from] SearchError),

    #[error("generation failed: {0}")]
    Generation(ProviderError),
}

/// Answers a question, optionally grounded in a snapshot of the index.
///
/// The index snapshot is taken by the caller before this runs, so a
/// concurrent re-ingestion can never swap the index out from under an
/// in-flight answer.
///
/// Never fails: any error is converted into an apology string carrying the
/// error detail.
pub(crate) async fn run(
    question: &str,
    index: Option<Arc<VectorIndex>>,
    embedder: &Embedder,
    provider: &Arc<dyn Provider>,
    llm: &LlmConfig,
    rag: &RagConfig,
) -> String {
    match try_answer(question, index, embedder, provider, llm, rag).await {
        Ok(answer) => answer,
        Err(e) => {
            warn!(error = %e, "answer pipeline failed");
            format!("Sorry, something went wrong:\n{e}")
        }
    }
}

async fn try_answer(
    question: &str,
    index: Option<Arc<VectorIndex>>,
    embedder: &Embedder,
    provider: &Arc<dyn Provider>,
    llm: &LlmConfig,
    rag: &RagConfig,
) -> Result<String, AnswerError> {
    let context = match index {
        Some(index) => {
            let query_vector = embedder.embed_query(question).await?;
            let results = index.search(&query_vector, rag.top_k)?;
            debug!(results = results.len(), "retrieved context chunks");
            results
                .iter()
                .map(|r| r.chunk.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n")
        }
        None => String::new(),
    };

    let prompt = compose_prompt(&context, question);

    let request = ChatRequest::new(llm.model.clone(), vec![Message::user(prompt)])
        .with_temperature(llm.temperature)
        .with_max_tokens(llm.max_tokens);

    provider.chat(request).await.map_err(AnswerError::Generation)
}

/// Builds the final prompt.
///
/// With retrieved context the question is framed against it; without any
/// (no document loaded yet) the question goes to the model as-is.
pub fn compose_prompt(context: &str, question: &str) -> String {
    if context.is_empty() {
        question.to_string()
    } else {
        format!("Context:\n{context}\n\nQuestion:\n{question}")
    }
}
