//! Index build orchestration: read docs → sections → chunks → inverted map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chunker::{ChunkerConfig, split_text};
use crate::document::{ChunkMetadata, DocChunk, DocIndex, INDEX_VERSION};
use crate::error::Result;
use crate::keywords::{DEFAULT_VOCABULARY, KeywordExtractor};
use crate::sections::extract_sections;

fn default_chunk_size() -> usize {
    512
}

fn default_chunk_overlap() -> usize {
    50
}

fn default_files() -> Vec<String> {
    [
        "README.md",
        "ARCHITECTURE.md",
        "PROJECT_STATUS.md",
        "QUICKSTART.md",
        "AI_HELP_SYSTEM.md",
        "AI_HELP_CHEATSHEET.md",
        "DOCS_NAVIGATION.md",
        "INDEX.md",
        "app/src/main/java/ru/macdroid/subagentstest/kmp-prompt.md",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_output() -> PathBuf {
    PathBuf::from(".docrag/indexed_docs.json")
}

fn default_vocabulary() -> Vec<String> {
    DEFAULT_VOCABULARY.iter().map(ToString::to_string).collect()
}

/// Indexer configuration, loadable from the `[index]` section of the
/// config file. The file list is fixed per run: the indexer never walks
/// the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default = "default_files")]
    pub files: Vec<String>,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_vocabulary")]
    pub vocabulary: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            files: default_files(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            output: default_output(),
            vocabulary: default_vocabulary(),
        }
    }
}

/// Summary of an indexing run.
#[derive(Debug, Default)]
pub struct IndexReport {
    pub documents: usize,
    pub chunks: usize,
    pub keywords: usize,
    pub skipped: Vec<String>,
}

/// Builds a [`DocIndex`] from a fixed list of markdown files.
pub struct Indexer {
    chunker: ChunkerConfig,
    extractor: KeywordExtractor,
    files: Vec<String>,
}

impl Indexer {
    #[must_use]
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            chunker: ChunkerConfig {
                chunk_size: config.chunk_size,
                overlap: config.chunk_overlap,
            },
            extractor: KeywordExtractor::new(config.vocabulary.clone()),
            files: config.files.clone(),
        }
    }

    /// Index every configured file under `root` and assemble the index.
    ///
    /// Missing files are skipped with a warning and recorded in the report;
    /// everything else is a full rebuild.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read.
    pub fn build(&self, root: &Path) -> Result<(DocIndex, IndexReport)> {
        let mut report = IndexReport::default();
        let mut all_chunks = Vec::new();

        for file in &self.files {
            let path = root.join(file);
            if !path.exists() {
                tracing::warn!(file, "documentation file not found, skipping");
                report.skipped.push(file.clone());
                continue;
            }
            let chunks = self.index_document(&path, file)?;
            tracing::info!(file, chunks = chunks.len(), "indexed");
            report.documents += 1;
            all_chunks.extend(chunks);
        }

        let mut keyword_index: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for chunk in &all_chunks {
            for keyword in &chunk.keywords {
                keyword_index
                    .entry(keyword.clone())
                    .or_default()
                    .push(chunk.id.clone());
            }
        }

        let mut sources: Vec<String> = all_chunks.iter().map(|c| c.source.clone()).collect();
        sources.sort();
        sources.dedup();

        report.chunks = all_chunks.len();
        report.keywords = keyword_index.len();

        let index = DocIndex {
            version: INDEX_VERSION.to_string(),
            created_at: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            total_chunks: all_chunks.len(),
            sources,
            chunks: all_chunks,
            keyword_index,
        };

        Ok((index, report))
    }

    /// Index a single markdown document into chunks with a running
    /// per-document chunk index.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn index_document(&self, path: &Path, rel_path: &str) -> Result<Vec<DocChunk>> {
        let content = std::fs::read_to_string(path)?;
        let source = path
            .file_name()
            .map_or_else(|| rel_path.to_string(), |n| n.to_string_lossy().to_string());

        let mut chunks = Vec::new();
        for section in extract_sections(&content) {
            let pieces = if section.content.chars().count() > self.chunker.chunk_size {
                split_text(&section.content, &self.chunker)
            } else {
                let trimmed = section.content.trim();
                if trimmed.is_empty() {
                    continue;
                }
                vec![trimmed.to_string()]
            };

            for piece in pieces {
                let keywords = self.extractor.extract(&piece);
                let metadata = ChunkMetadata {
                    section_title: section.title.clone(),
                    section_level: section.level,
                    file_path: rel_path.to_string(),
                };
                chunks.push(DocChunk::new(
                    source.clone(),
                    piece,
                    chunks.len(),
                    metadata,
                    keywords,
                ));
            }
        }

        Ok(chunks)
    }
}
