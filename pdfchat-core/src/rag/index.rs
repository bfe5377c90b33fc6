//! In-memory vector index with cosine-similarity search.
//!
//! The index is immutable once built: one ingestion produces one index, and
//! replacing it means building a new one. Search is an exact linear scan,
//! which is plenty for a single document's worth of chunks. For corpora far
//! beyond that, this type is the seam where an approximate structure (HNSW
//! or similar) would be substituted without touching the callers.

use super::types::{Chunk, ScoredChunk};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors that can occur while building an index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// An index must hold at least one chunk.
    #[error("cannot build an index from zero chunks")]
    Empty,

    /// Chunks and vectors must be parallel sequences.
    #[error("got {chunks} chunks but {vectors} vectors")]
    LengthMismatch { chunks: usize, vectors: usize },

    /// All vectors must share one dimension.
    #[error("inconsistent vector dimensions: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Errors that can occur while searching.
#[derive(Debug, Error)]
pub enum SearchError {
    /// `k` must be at least 1.
    #[error("top_k must be positive")]
    InvalidTopK,

    /// The query vector does not match the index dimension.
    #[error("query dimension {found} does not match index dimension {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// An immutable in-memory vector index over one document's chunks.
#[derive(Debug)]
pub struct VectorIndex {
    chunks: Vec<Chunk>,
    vectors: Vec<Vec<f32>>,
    dimension: usize,
}

impl VectorIndex {
    /// Builds an index from parallel chunk and vector sequences.
    ///
    /// Fails if the sequences are empty, of different lengths, or if the
    /// vectors do not all share one dimension.
    pub fn build(chunks: Vec<Chunk>, vectors: Vec<Vec<f32>>) -> Result<Self, IndexError> {
        if chunks.len() != vectors.len() {
            return Err(IndexError::LengthMismatch {
                chunks: chunks.len(),
                vectors: vectors.len(),
            });
        }
        let Some(first) = vectors.first() else {
            return Err(IndexError::Empty);
        };

        let dimension = first.len();
        for vector in &vectors {
            if vector.len() != dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: dimension,
                    found: vector.len(),
                });
            }
        }

        Ok(Self {
            chunks,
            vectors,
            dimension,
        })
    }

    /// Searches for the `top_k` chunks most similar to the query vector.
    ///
    /// Performs a linear scan, scoring every chunk by cosine similarity.
    /// Results are sorted by descending score; equal scores keep their
    /// original chunk order. Returns at most `min(top_k, len)` results.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<ScoredChunk>, SearchError> {
        if top_k == 0 {
            return Err(SearchError::InvalidTopK);
        }
        if query.len() != self.dimension {
            return Err(SearchError::DimensionMismatch {
                expected: self.dimension,
                found: query.len(),
            });
        }

        let mut results: Vec<ScoredChunk> = self
            .chunks
            .iter()
            .zip(self.vectors.iter())
            .map(|(chunk, vector)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(query, vector),
            })
            .collect();

        // Stable sort keeps original chunk order on ties.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(top_k);

        Ok(results)
    }

    /// Number of chunks in the index.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Embedding dimension shared by every vector in the index.
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Computes cosine similarity between two equal-length vectors.
///
/// Returns values from -1.0 (opposite) to 1.0 (identical), or 0.0 when
/// either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, offset: usize) -> Chunk {
        Chunk::new(text, "doc", offset)
    }

    #[test]
    fn test_cosine_similarity() {
        assert_eq!(cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]), 1.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_build_empty() {
        let err = VectorIndex::build(vec![], vec![]).unwrap_err();
        assert!(matches!(err, IndexError::Empty));
    }

    #[test]
    fn test_build_length_mismatch() {
        let err = VectorIndex::build(vec![chunk("a", 0)], vec![]).unwrap_err();
        assert!(matches!(err, IndexError::LengthMismatch { .. }));
    }

    #[test]
    fn test_build_dimension_mismatch() {
        let err = VectorIndex::build(
            vec![chunk("a", 0), chunk("b", 1)],
            vec![vec![1.0, 0.0], vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(err, IndexError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_search_invalid_top_k() {
        let index = VectorIndex::build(vec![chunk("a", 0)], vec![vec![1.0]]).unwrap();
        let err = index.search(&[1.0], 0).unwrap_err();
        assert!(matches!(err, SearchError::InvalidTopK));
    }

    #[test]
    fn test_search_query_dimension_mismatch() {
        let index = VectorIndex::build(vec![chunk("a", 0)], vec![vec![1.0, 0.0]]).unwrap();
        let err = index.search(&[1.0], 1).unwrap_err();
        assert!(matches!(err, SearchError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_trivial_recall() {
        let index = VectorIndex::build(vec![chunk("only", 0)], vec![vec![0.3, 0.7]]).unwrap();
        let results = index.search(&[0.3, 0.7], 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.text, "only");
    }

    #[test]
    fn test_orthogonal_round_trip() {
        let index = VectorIndex::build(
            vec![chunk("first", 0), chunk("second", 10)],
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        )
        .unwrap();

        let results = index.search(&[1.0, 0.0], 2).unwrap();
        assert_eq!(results[0].chunk.text, "first");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_search_caps_at_len_and_sorts_descending() {
        let index = VectorIndex::build(
            vec![chunk("a", 0), chunk("b", 1), chunk("c", 2)],
            vec![vec![1.0, 0.0], vec![0.5, 0.5], vec![0.0, 1.0]],
        )
        .unwrap();

        let results = index.search(&[1.0, 0.0], 10).unwrap();
        assert_eq!(results.len(), 3);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_tie_broken_by_chunk_order() {
        let index = VectorIndex::build(
            vec![chunk("earlier", 0), chunk("later", 5)],
            vec![vec![1.0, 0.0], vec![1.0, 0.0]],
        )
        .unwrap();

        let results = index.search(&[1.0, 0.0], 2).unwrap();
        assert_eq!(results[0].chunk.text, "earlier");
        assert_eq!(results[1].chunk.text, "later");
    }
}
