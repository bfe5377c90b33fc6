/// A bounded span of a document's text, the unit of retrieval.
///
/// Chunks are produced in source order by the chunker and are immutable once
/// the index that embedded them is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// The chunk text. At most `chunk_size` characters.
    pub text: String,
    /// Source identifier of the document this chunk came from.
    pub source: String,
    /// Character offset of the chunk within the document text.
    pub offset: usize,
}

impl Chunk {
    pub fn new(text: impl Into<String>, source: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            offset,
        }
    }
}

/// A search result: a chunk and its similarity score.
///
/// Returned by index searches, ordered by descending score. Cosine similarity
/// ranges from -1.0 (opposite) to 1.0 (identical); text embeddings mostly land
/// between 0.0 and 1.0.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}
