//! Keyword relevance search over a loaded index.

use crate::document::{DocChunk, DocIndex};

const PHRASE_WEIGHT: f64 = 10.0;
const TERM_WEIGHT: f64 = 2.0;
const KEYWORD_WEIGHT: f64 = 5.0;
const TITLE_WEIGHT: f64 = 3.0;
/// Query words shorter than this don't contribute term score.
const MIN_WORD_LEN: usize = 3;

/// Default result cap for free-form queries.
pub const DEFAULT_MAX_RESULTS: usize = 5;
/// Result cap for `/help` command searches.
const COMMAND_MAX_RESULTS: usize = 3;

/// A chunk paired with its relevance score for one query.
#[derive(Debug, Clone)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a DocChunk,
    pub score: f64,
}

/// Read-only search over a [`DocIndex`].
pub struct DocSearcher {
    index: DocIndex,
}

impl DocSearcher {
    #[must_use]
    pub fn new(index: DocIndex) -> Self {
        Self { index }
    }

    #[must_use]
    pub fn index(&self) -> &DocIndex {
        &self.index
    }

    /// Score every chunk against `query` and return the best matches,
    /// highest score first. Zero-score chunks never appear.
    #[must_use]
    pub fn search(&self, query: &str, max_results: usize) -> Vec<ScoredChunk<'_>> {
        let query_lower = query.to_lowercase();
        let words = query_words(&query_lower);

        let mut results: Vec<ScoredChunk<'_>> = self
            .index
            .chunks
            .iter()
            .filter_map(|chunk| {
                let score = relevance(chunk, &query_lower, &words);
                (score > 0.0).then_some(ScoredChunk { chunk, score })
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(max_results);
        results
    }

    /// Resolve a `/help` command to its canned query and search with the
    /// command result cap. Unmapped commands search their raw text minus
    /// the `/help ` prefix.
    #[must_use]
    pub fn search_command(&self, command: &str) -> Vec<ScoredChunk<'_>> {
        let command = command.trim().to_lowercase();
        let query = canned_query(&command)
            .map_or_else(|| command.replace("/help ", ""), ToString::to_string);
        self.search(&query, COMMAND_MAX_RESULTS)
    }
}

fn canned_query(command: &str) -> Option<&'static str> {
    let query = match command {
        "/help" => "help commands available",
        "/help architecture" => "clean architecture layers domain presentation data",
        "/help feature" => "add new feature use case repository viewmodel",
        "/help koin" => "koin dependency injection module",
        "/help sqldelight" => "sqldelight database queries schema",
        "/help compose" => "compose multiplatform ui screen",
        "/help testing" => "testing unit test",
        "/help git" => "git workflow branch",
        _ => return None,
    };
    Some(query)
}

/// Maximal alphanumeric/underscore runs of the (already lowercased) query.
fn query_words(query: &str) -> Vec<&str> {
    query
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| !w.is_empty())
        .collect()
}

fn relevance(chunk: &DocChunk, query: &str, words: &[&str]) -> f64 {
    let content = chunk.content.to_lowercase();
    let mut score = 0.0;

    if content.contains(query) {
        score += PHRASE_WEIGHT;
    }

    for word in words {
        if word.len() < MIN_WORD_LEN {
            continue;
        }
        let occurrences = content.matches(word).count();
        #[allow(clippy::cast_precision_loss)]
        {
            score += occurrences as f64 * TERM_WEIGHT;
        }
    }

    let keywords: Vec<String> = chunk.keywords.iter().map(|k| k.to_lowercase()).collect();
    let title = chunk.metadata.section_title.to_lowercase();
    for word in words {
        if keywords.iter().any(|k| k == word) {
            score += KEYWORD_WEIGHT;
        }
        if title.contains(word) {
            score += TITLE_WEIGHT;
        }
    }

    score
}

/// Render results as a markdown list with fenced 300-char excerpts.
#[must_use]
pub fn format_results(results: &[ScoredChunk<'_>]) -> String {
    if results.is_empty() {
        return "No relevant documentation found.".to_string();
    }

    let mut output = vec!["**Found relevant documentation:**\n".to_string()];
    for (i, result) in results.iter().enumerate() {
        let chunk = result.chunk;
        let excerpt: String = chunk.content.chars().take(300).collect();
        output.push(format!(
            "**{}. {}** - {}",
            i + 1,
            chunk.source,
            chunk.metadata.section_title
        ));
        output.push(format!("   Relevance: {:.1}", result.score));
        output.push("```".to_string());
        output.push(format!("{excerpt}..."));
        output.push("```\n".to_string());
    }

    output.join("\n")
}
