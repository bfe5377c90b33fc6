//! PDF loading and text extraction.
//!
//! Parses a PDF file and extracts its text layer page by page. Pages are
//! joined with blank lines so that page breaks look like paragraph breaks to
//! the chunker.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while loading a document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read from disk.
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not a valid PDF.
    #[error("failed to parse PDF: {0}")]
    Parse(#[from] lopdf::Error),

    /// The PDF has no text layer (e.g. a scanned-image-only document).
    #[error("no extractable text in {}", .0.display())]
    NoText(PathBuf),
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// A loaded document: full text plus provenance. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source identifier (the file path).
    pub source: String,
    /// Extracted text, pages joined with blank lines.
    pub text: String,
    /// Number of pages in the source PDF.
    pub pages: usize,
}

/// Loads a PDF file and extracts its text.
///
/// Pages that fail text extraction (or contain no text) are skipped; the
/// load fails with [`LoadError::NoText`] only when no page yields any text.
pub fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let pdf = lopdf::Document::load_mem(&bytes)?;

    let page_numbers: Vec<u32> = pdf.get_pages().keys().copied().collect();
    let page_count = page_numbers.len();

    let mut page_texts = Vec::with_capacity(page_count);
    for number in page_numbers {
        match pdf.extract_text(&[number]) {
            Ok(text) => {
                let text = text.trim().to_string();
                if !text.is_empty() {
                    page_texts.push(text);
                }
            }
            Err(e) => {
                warn!(page = number, error = %e, "skipping page with unextractable text");
            }
        }
    }

    if page_texts.is_empty() {
        return Err(LoadError::NoText(path.to_path_buf()));
    }

    debug!(
        path = %path.display(),
        pages = page_count,
        text_pages = page_texts.len(),
        "extracted PDF text"
    );

    Ok(Document {
        source: path.display().to_string(),
        text: page_texts.join("\n\n"),
        pages: page_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_test_pdf;
    use std::io::Write;

    #[test]
    fn test_load_multi_page_pdf() {
        let file = write_test_pdf(&["First page text.", "Second page text.", "Third page."]);

        let document = load_pdf(file.path()).unwrap();
        assert_eq!(document.pages, 3);
        assert!(document.text.contains("First page text."));
        assert!(document.text.contains("Third page."));
        // Pages are joined with a blank line.
        assert!(document.text.contains("\n\n"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_pdf("/nonexistent/file.pdf").unwrap_err();
        assert!(matches!(err, LoadError::Read(_)));
    }

    #[test]
    fn test_load_corrupt_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let err = load_pdf(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_load_pdf_without_text_layer() {
        let file = write_test_pdf(&["", ""]);

        let err = load_pdf(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::NoText(_)));
    }
}
