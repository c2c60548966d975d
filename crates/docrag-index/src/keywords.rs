//! Fixed-vocabulary keyword extraction.

/// Default vocabulary: the terms worth tracking in this project's docs.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "Clean Architecture",
    "Koin",
    "SQLDelight",
    "Compose",
    "ViewModel",
    "UseCase",
    "Repository",
    "Flow",
    "StateFlow",
    "Coroutines",
    "KMP",
    "Multiplatform",
    "Android",
    "iOS",
    "Desktop",
    "Web",
];

/// Extracts vocabulary terms present in chunk content.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    vocabulary: Vec<String>,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY.iter().map(ToString::to_string).collect(),
        }
    }
}

impl KeywordExtractor {
    #[must_use]
    pub fn new(vocabulary: Vec<String>) -> Self {
        Self { vocabulary }
    }

    /// Return the canonical vocabulary terms contained in `content`,
    /// case-insensitively, after stripping markdown punctuation.
    #[must_use]
    pub fn extract(&self, content: &str) -> Vec<String> {
        let text = strip_markdown(content).to_lowercase();
        self.vocabulary
            .iter()
            .filter(|term| text.contains(&term.to_lowercase()))
            .cloned()
            .collect()
    }
}

/// Drop the markdown formatting characters that would otherwise split a
/// term across punctuation (`**Koin**`, `[Compose]`, `` `Flow` ``).
fn strip_markdown(content: &str) -> String {
    content
        .chars()
        .filter(|c| !matches!(c, '#' | '*' | '`' | '_' | '[' | ']' | '(' | ')'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_case_insensitively() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("we use koin and compose everywhere");
        assert!(keywords.contains(&"Koin".to_string()));
        assert!(keywords.contains(&"Compose".to_string()));
    }

    #[test]
    fn canonical_spelling_recorded() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("SQLDELIGHT queries");
        assert_eq!(keywords, vec!["SQLDelight".to_string()]);
    }

    #[test]
    fn markdown_formatting_stripped() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("**Koin** module and `Flow` usage");
        assert!(keywords.contains(&"Koin".to_string()));
        assert!(keywords.contains(&"Flow".to_string()));
    }

    #[test]
    fn multi_word_term_matched() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("follows clean architecture with layers");
        assert!(keywords.contains(&"Clean Architecture".to_string()));
    }

    #[test]
    fn no_terms_empty_result() {
        let extractor = KeywordExtractor::default();
        assert!(extractor.extract("nothing relevant here").is_empty());
    }

    #[test]
    fn custom_vocabulary() {
        let extractor = KeywordExtractor::new(vec!["Tokio".into(), "Serde".into()]);
        let keywords = extractor.extract("async with tokio runtime");
        assert_eq!(keywords, vec!["Tokio".to_string()]);
    }

    #[test]
    fn strip_markdown_removes_expected_chars() {
        assert_eq!(strip_markdown("#*`_[]()ok"), "ok");
        assert_eq!(strip_markdown("plain"), "plain");
    }
}
