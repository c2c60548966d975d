//! Markdown documentation indexing and keyword-based retrieval.
//!
//! The pipeline is deliberately small: documents split into header-delimited
//! sections, long sections split into overlapping character chunks, each
//! chunk tagged with a fixed keyword vocabulary, everything serialized into
//! a single JSON blob. Search scores chunks with a weighted linear heuristic
//! (phrase match, term frequency, keyword and title membership). No learned
//! ranking, no incremental updates, full rebuild on every run.

pub mod chunker;
pub mod document;
pub mod error;
pub mod indexer;
pub mod keywords;
pub mod searcher;
pub mod sections;
pub mod store;

pub use error::{IndexError, Result};
