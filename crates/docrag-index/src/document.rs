//! Chunk and index data model, serialized as the on-disk JSON blob.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Format version written into every index blob.
pub const INDEX_VERSION: &str = "1.0.0";

/// Positional metadata carried by every chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub section_title: String,
    pub section_level: usize,
    pub file_path: String,
}

/// One chunk of documentation: a bounded substring of a source document,
/// tagged with its section of origin and extracted keywords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocChunk {
    pub id: String,
    pub source: String,
    pub content: String,
    pub chunk_index: usize,
    pub metadata: ChunkMetadata,
    pub char_count: usize,
    pub keywords: Vec<String>,
}

impl DocChunk {
    #[must_use]
    pub fn new(
        source: String,
        content: String,
        chunk_index: usize,
        metadata: ChunkMetadata,
        keywords: Vec<String>,
    ) -> Self {
        let id = chunk_id(&source, chunk_index, &content);
        let char_count = content.chars().count();
        Self {
            id,
            source,
            content,
            chunk_index,
            metadata,
            char_count,
            keywords,
        }
    }
}

/// The full searchable index: all chunks plus the inverted keyword map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocIndex {
    pub version: String,
    pub created_at: String,
    pub total_chunks: usize,
    pub sources: Vec<String>,
    pub chunks: Vec<DocChunk>,
    pub keyword_index: BTreeMap<String, Vec<String>>,
}

impl DocIndex {
    /// An index with no chunks, for callers that degrade gracefully when
    /// nothing has been indexed yet.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: INDEX_VERSION.to_string(),
            created_at: String::new(),
            total_chunks: 0,
            sources: Vec::new(),
            chunks: Vec::new(),
            keyword_index: BTreeMap::new(),
        }
    }
}

/// Content-addressed chunk identifier: source, position, and a content
/// prefix feed the hash so reindexing unchanged docs yields stable ids.
#[must_use]
pub fn chunk_id(source: &str, chunk_index: usize, content: &str) -> String {
    let prefix: String = content.chars().take(50).collect();
    let data = format!("{source}:{chunk_index}:{prefix}");
    blake3::hash(data.as_bytes()).to_hex().to_string()
}
