//! Assembles the context block handed to the LLM alongside a user query.

use std::fmt::Write as _;
use std::path::PathBuf;

use docrag_index::searcher::DocSearcher;

use crate::git::GitContext;

const MAX_DOC_HITS: usize = 3;
const DOC_EXCERPT_CHARS: usize = 500;
const HELP_EXCERPT_CHARS: usize = 600;
const MAX_MODIFIED_FILES: usize = 10;
const MAX_COMMITS: usize = 3;

const HELP_TOPICS: &[(&str, &str)] = &[
    ("architecture", "Clean Architecture with Feature Slicing"),
    ("koin", "Dependency Injection with Koin"),
    ("compose", "Compose Multiplatform UI"),
    ("sqldelight", "SQLDelight Database"),
    ("testing", "Testing Patterns"),
    ("git", "Git Workflow"),
];

/// Builds query context from the project context file, git state, and the
/// top documentation hits.
pub struct ContextBuilder {
    searcher: DocSearcher,
    repo_root: PathBuf,
    context_file: Option<PathBuf>,
}

impl ContextBuilder {
    #[must_use]
    pub fn new(searcher: DocSearcher, repo_root: PathBuf, context_file: Option<PathBuf>) -> Self {
        Self {
            searcher,
            repo_root,
            context_file,
        }
    }

    /// Assemble the context block: project context file, git state, then
    /// the top documentation hits excerpted to 500 chars each.
    pub async fn build(&self, query: &str) -> String {
        let mut out = String::new();

        if let Some(path) = &self.context_file
            && let Ok(content) = std::fs::read_to_string(path)
        {
            out.push_str("# Project Context\n");
            out.push_str(&content);
        }

        out.push_str("\n# Git Context\n");
        let git = GitContext::collect(&self.repo_root).await;
        let _ = writeln!(out, "**Branch:** {}", git.branch);

        if !git.modified_files.is_empty() {
            out.push_str("**Modified files:**\n");
            for file in git.modified_files.iter().take(MAX_MODIFIED_FILES) {
                let _ = writeln!(out, "- {file}");
            }
        }

        if !git.recent_commits.is_empty() {
            out.push_str("\n**Recent commits:**\n");
            for commit in git.recent_commits.iter().take(MAX_COMMITS) {
                let _ = writeln!(out, "- {commit}");
            }
        }

        let hits = self.searcher.search(query, MAX_DOC_HITS);
        if !hits.is_empty() {
            out.push_str("\n# Relevant Documentation\n");
            for hit in &hits {
                let chunk = hit.chunk;
                let excerpt: String = chunk.content.chars().take(DOC_EXCERPT_CHARS).collect();
                let _ = writeln!(
                    out,
                    "\n## From {} - {}",
                    chunk.source, chunk.metadata.section_title
                );
                let _ = writeln!(out, "{excerpt}...");
            }
        }

        out
    }

    /// Render a `/help` response: the topic list for a bare `help`, or
    /// excerpts from the docs for a named topic.
    #[must_use]
    pub fn help_response(&self, topic: &str) -> String {
        let topic = topic.trim();
        if topic.is_empty() || topic == "help" {
            let mut out = vec!["# Available Help Topics\n".to_string()];
            for (key, desc) in HELP_TOPICS {
                out.push(format!("- `/help {key}` - {desc}"));
            }
            return out.join("\n");
        }

        let hits = self.searcher.search(topic, MAX_DOC_HITS);
        if hits.is_empty() {
            return format!("No documentation found for: {topic}");
        }

        let mut out = vec![format!("# Help: {}\n", title_case(topic))];
        for hit in &hits {
            let chunk = hit.chunk;
            let excerpt: String = chunk.content.chars().take(HELP_EXCERPT_CHARS).collect();
            out.push(format!("\n## {}\n", chunk.source));
            out.push(excerpt);
            out.push("\n---\n".to_string());
        }
        out.join("\n")
    }

    #[must_use]
    pub fn searcher(&self) -> &DocSearcher {
        &self.searcher
    }
}

/// Frame an assembled context for piping to an LLM CLI.
#[must_use]
pub fn frame_prompt(context: &str, query: &str) -> String {
    let rule = "=".repeat(80);
    format!("{rule}\nCONTEXT FOR CLAUDE\n{rule}\n{context}\n\n{rule}\nUSER QUERY: {query}\n{rule}")
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docrag_index::document::{ChunkMetadata, DocChunk, DocIndex, INDEX_VERSION};
    use std::collections::BTreeMap;
    use std::path::Path;

    fn searcher_with(content: &str) -> DocSearcher {
        let chunk = DocChunk::new(
            "ARCHITECTURE.md".into(),
            content.into(),
            0,
            ChunkMetadata {
                section_title: "Layers".into(),
                section_level: 2,
                file_path: "docs/ARCHITECTURE.md".into(),
            },
            vec![],
        );
        DocSearcher::new(DocIndex {
            version: INDEX_VERSION.into(),
            created_at: "2026-02-01".into(),
            total_chunks: 1,
            sources: vec!["ARCHITECTURE.md".into()],
            chunks: vec![chunk],
            keyword_index: BTreeMap::new(),
        })
    }

    fn builder(content: &str, root: &Path) -> ContextBuilder {
        ContextBuilder::new(searcher_with(content), root.to_path_buf(), None)
    }

    #[tokio::test]
    async fn build_includes_git_and_docs() {
        let dir = tempfile::tempdir().unwrap();
        let b = builder("clean architecture layers explained here", dir.path());
        let ctx = b.build("architecture layers").await;

        assert!(ctx.contains("# Git Context"));
        assert!(ctx.contains("**Branch:** unknown"));
        assert!(ctx.contains("# Relevant Documentation"));
        assert!(ctx.contains("## From ARCHITECTURE.md - Layers"));
    }

    #[tokio::test]
    async fn build_includes_project_context_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx_file = dir.path().join("claude_context.md");
        std::fs::write(&ctx_file, "project overview text").unwrap();

        let b = ContextBuilder::new(
            searcher_with("unrelated"),
            dir.path().to_path_buf(),
            Some(ctx_file),
        );
        let ctx = b.build("nothing matches").await;

        assert!(ctx.contains("# Project Context"));
        assert!(ctx.contains("project overview text"));
        assert!(!ctx.contains("# Relevant Documentation"));
    }

    #[tokio::test]
    async fn doc_excerpts_capped_at_500_chars() {
        let dir = tempfile::tempdir().unwrap();
        let long = format!("architecture {}", "x".repeat(800));
        let b = builder(&long, dir.path());
        let ctx = b.build("architecture").await;

        let excerpt_line = ctx.lines().find(|l| l.starts_with("architecture ")).unwrap();
        assert_eq!(excerpt_line.chars().count(), 500 + 3);
    }

    #[test]
    fn bare_help_lists_topics() {
        let dir = tempfile::tempdir().unwrap();
        let b = builder("whatever", dir.path());
        let out = b.help_response("");
        assert!(out.contains("# Available Help Topics"));
        assert!(out.contains("`/help koin`"));
        assert!(out.contains("`/help testing`"));
    }

    #[test]
    fn named_topic_renders_excerpts() {
        let dir = tempfile::tempdir().unwrap();
        let b = builder("koin modules wire the dependency graph", dir.path());
        let out = b.help_response("koin");
        assert!(out.contains("# Help: Koin"));
        assert!(out.contains("## ARCHITECTURE.md"));
        assert!(out.contains("---"));
    }

    #[test]
    fn unknown_topic_no_hits_message() {
        let dir = tempfile::tempdir().unwrap();
        let b = builder("nothing relevant", dir.path());
        let out = b.help_response("quantum");
        assert_eq!(out, "No documentation found for: quantum");
    }

    #[tokio::test]
    async fn empty_index_degrades_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        let b = ContextBuilder::new(
            DocSearcher::new(DocIndex::empty()),
            dir.path().to_path_buf(),
            None,
        );

        assert!(b.help_response("").contains("# Available Help Topics"));
        assert_eq!(b.help_response("koin"), "No documentation found for: koin");

        let ctx = b.build("anything").await;
        assert!(ctx.contains("# Git Context"));
        assert!(!ctx.contains("# Relevant Documentation"));
    }

    #[test]
    fn frame_prompt_layout() {
        let framed = frame_prompt("ctx body", "how do I add a screen");
        let rule = "=".repeat(80);
        assert!(framed.starts_with(&rule));
        assert!(framed.contains("CONTEXT FOR CLAUDE"));
        assert!(framed.contains("ctx body"));
        assert!(framed.contains("USER QUERY: how do I add a screen"));
        assert!(framed.ends_with(&rule));
    }
}
