//! Shared test doubles and fixtures.

use crate::provider::{ChatRequest, Provider, ProviderError, Result};
use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Deterministic provider double.
///
/// Embeddings are derived from the text itself, so identical texts always
/// map to identical vectors and different texts (almost always) differ.
/// Every prompt sent to `chat` is recorded for assertions.
pub(crate) struct MockProvider {
    fail_embeddings: bool,
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub(crate) fn new() -> Self {
        Self {
            fail_embeddings: false,
            reply: "a perfectly reasonable answer".to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A provider whose embedding endpoint always fails.
    pub(crate) fn failing_embeddings() -> Self {
        Self {
            fail_embeddings: true,
            ..Self::new()
        }
    }

    /// Prompts received by `chat`, in order.
    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// The vector this mock would produce for `text`.
    pub(crate) fn embedding_for(&self, text: &str) -> Vec<f32> {
        mock_embedding(text)
    }
}

fn mock_embedding(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0f32; 8];
    for (i, byte) in text.bytes().enumerate() {
        vector[i % 8] += f32::from(byte);
    }
    vector
}

#[async_trait]
impl Provider for MockProvider {
    async fn chat(&self, request: ChatRequest) -> Result<String> {
        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);
        Ok(self.reply.clone())
    }

    async fn embed_batch(&self, texts: &[&str], _model: &str) -> Result<Vec<Vec<f32>>> {
        if self.fail_embeddings {
            return Err(ProviderError::Api("simulated embedding outage".to_string()));
        }
        Ok(texts.iter().map(|t| mock_embedding(t)).collect())
    }
}

/// Writes a minimal valid PDF with one page per entry in `pages`.
///
/// An empty string produces a page with no text content, which is how a
/// scanned-image-only page looks to the text extractor.
pub(crate) fn write_test_pdf(pages: &[&str]) -> NamedTempFile {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let file = NamedTempFile::new().unwrap();
    doc.save(file.path()).unwrap();
    file
}
