//! Recursive text chunking.
//!
//! Splits document text into overlapping, size-bounded chunks. Split points
//! prefer natural boundaries in descending order of strength: paragraph
//! break, line break, sentence end, whitespace. A hard character cut is used
//! only when no boundary exists inside the window, so chunks rarely end
//! mid-word or mid-sentence.
//!
//! All sizes and offsets are measured in characters, never bytes, so
//! multi-byte text is split safely.

use super::types::Chunk;
use thiserror::Error;

/// Errors that can occur during chunking.
#[derive(Debug, Error)]
pub enum ChunkError {
    /// Overlap must be strictly smaller than the chunk size, and the size
    /// must be positive.
    #[error("invalid chunking config: chunk_size {size} with chunk_overlap {overlap}")]
    InvalidConfig { size: usize, overlap: usize },

    /// The document contains no extractable text.
    #[error("document has no extractable text")]
    EmptyDocument,
}

pub type Result<T> = std::result::Result<T, ChunkError>;

/// Chunking parameters, in characters.
#[derive(Debug, Clone, Copy)]
pub struct ChunkConfig {
    /// Maximum chunk length.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,
}

/// Boundary preference, strongest first.
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", "? ", "! ", " "];

/// Splits `text` into overlapping chunks in source order.
///
/// Adjacent chunks share exactly `chunk_overlap` characters. Every chunk
/// extends coverage past its predecessor, the sequence covers the whole
/// document, and the split is deterministic for a given input and config.
pub fn chunk(text: &str, source: &str, cfg: &ChunkConfig) -> Result<Vec<Chunk>> {
    if cfg.chunk_size == 0 || cfg.chunk_overlap >= cfg.chunk_size {
        return Err(ChunkError::InvalidConfig {
            size: cfg.chunk_size,
            overlap: cfg.chunk_overlap,
        });
    }
    if text.trim().is_empty() {
        return Err(ChunkError::EmptyDocument);
    }

    // Byte offset of every char, with a sentinel for the end of the text,
    // so char-indexed windows map back to byte slices.
    let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    boundaries.push(text.len());
    let total_chars = boundaries.len() - 1;

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut covered = 0;

    while start < total_chars {
        let window_end = (start + cfg.chunk_size).min(total_chars);
        let end = if window_end == total_chars {
            total_chars
        } else {
            // A split must land past everything already covered and past the
            // overlap region, or the chunk would duplicate its predecessor
            // and the next boundary would lose its overlap.
            let min_end = covered.max(start + cfg.chunk_overlap);
            split_point(text, &boundaries, start, window_end, min_end)
        };

        let slice = &text[boundaries[start]..boundaries[end]];
        chunks.push(Chunk::new(slice, source, start));

        if end == total_chars {
            break;
        }

        covered = end;
        start = end - cfg.chunk_overlap;
    }

    Ok(chunks)
}

/// Picks the split point inside `[start, window_end)`, in char indices.
///
/// Tries each separator tier in turn and takes the latest occurrence within
/// the window, keeping the separator with the leading chunk. Occurrences at
/// or before `min_end` are rejected so every chunk extends coverage; falls
/// back to a hard cut at the window end.
fn split_point(
    text: &str,
    boundaries: &[usize],
    start: usize,
    window_end: usize,
    min_end: usize,
) -> usize {
    let window = &text[boundaries[start]..boundaries[window_end]];

    for separator in SEPARATORS {
        if let Some(pos) = window.rfind(separator) {
            let break_bytes = pos + separator.len();
            let break_chars = window[..break_bytes].chars().count();
            if start + break_chars > min_end {
                return start + break_chars;
            }
        }
    }

    window_end
}
