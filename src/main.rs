use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};

use docrag_index::indexer::Indexer;
use docrag_index::searcher::{DEFAULT_MAX_RESULTS, DocSearcher, ScoredChunk, format_results};
use docrag_index::store;
use docrag_llm::ClaudeProvider;
use docrag_review::{ContextBuilder, ReviewAssistant, ReviewConfig, render_error_report};
use docrag_review::context::frame_prompt;
use docrag_review::prompt::load_project_context;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "docrag", version, about = "Documentation indexing, search, and AI code review")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Config file path (env: DOCRAG_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the documentation index and save it to disk
    Index,
    /// Search the indexed documentation
    Search {
        /// Query text; `/help`-prefixed queries use the command map
        #[arg(required = true)]
        query: Vec<String>,
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        limit: usize,
    },
    /// Show help topics or excerpts for a named topic
    Help { topic: Option<String> },
    /// Print the assembled context for a query
    Context {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Print the framed context plus query, ready to pipe to an LLM CLI
    Prompt {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Run AI code review over a PR diff and post-ready markdown
    Review {
        #[arg(long)]
        diff_file: PathBuf,
        #[arg(long)]
        files_file: PathBuf,
        #[arg(long)]
        pr_info_file: PathBuf,
        #[arg(long, default_value = "docs")]
        docs_dir: PathBuf,
        #[arg(long)]
        output_file: PathBuf,
        /// Separate review config; defaults to the `[review]` section of
        /// the main config
        #[arg(long)]
        review_config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::load(&resolve_config_path(cli.config.as_ref()))?;

    match cli.command {
        Command::Index => run_index(&config),
        Command::Search { query, limit } => run_search(&config, &query.join(" "), limit),
        Command::Help { topic } => {
            let builder = context_builder(&config)?;
            println!("{}", builder.help_response(topic.as_deref().unwrap_or("")));
            Ok(())
        }
        Command::Context { query } => {
            let builder = context_builder(&config)?;
            println!("{}", builder.build(&query.join(" ")).await);
            Ok(())
        }
        Command::Prompt { query } => {
            let query = query.join(" ");
            let builder = context_builder(&config)?;
            let context = builder.build(&query).await;
            println!("{}", frame_prompt(&context, &query));
            Ok(())
        }
        Command::Review {
            diff_file,
            files_file,
            pr_info_file,
            docs_dir,
            output_file,
            review_config,
        } => {
            run_review(
                &config,
                &diff_file,
                &files_file,
                &pr_info_file,
                &docs_dir,
                &output_file,
                review_config.as_deref(),
            )
            .await
        }
    }
}

fn resolve_config_path(flag: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path.clone();
    }
    if let Ok(path) = std::env::var("DOCRAG_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

fn run_index(config: &Config) -> anyhow::Result<()> {
    let indexer = Indexer::new(&config.index);
    let (index, report) = indexer
        .build(&std::env::current_dir()?)
        .context("indexing failed")?;

    store::save(&index, &config.index.output)
        .with_context(|| format!("failed to save index to {}", config.index.output.display()))?;

    println!("Indexed {} documents into {} chunks", report.documents, report.chunks);
    println!("Keywords tracked: {}", report.keywords);
    for skipped in &report.skipped {
        println!("Skipped (not found): {skipped}");
    }

    let top = top_keywords(&index.keyword_index, 10);
    if !top.is_empty() {
        println!("\nTop keywords:");
        for (keyword, count) in top {
            println!("  {keyword}: {count} chunks");
        }
    }
    println!("\nIndex saved to {}", config.index.output.display());
    Ok(())
}

fn top_keywords(
    keyword_index: &std::collections::BTreeMap<String, Vec<String>>,
    limit: usize,
) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = keyword_index
        .iter()
        .map(|(k, ids)| (k.as_str(), ids.len()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    counts.truncate(limit);
    counts
}

fn load_searcher(config: &Config) -> anyhow::Result<DocSearcher> {
    let index = store::load(&config.index.output)?;
    Ok(DocSearcher::new(index))
}

/// Like [`load_searcher`], but a missing index degrades to an empty one so
/// the help/context/prompt commands still work on a fresh checkout.
fn load_searcher_lenient(config: &Config) -> anyhow::Result<DocSearcher> {
    match store::load(&config.index.output) {
        Ok(index) => Ok(DocSearcher::new(index)),
        Err(docrag_index::IndexError::IndexMissing(path)) => {
            tracing::warn!(
                path = %path.display(),
                "index not found, continuing without documentation hits"
            );
            Ok(DocSearcher::new(docrag_index::document::DocIndex::empty()))
        }
        Err(err) => Err(err.into()),
    }
}

fn context_builder(config: &Config) -> anyhow::Result<ContextBuilder> {
    let searcher = load_searcher_lenient(config)?;
    Ok(ContextBuilder::new(
        searcher,
        std::env::current_dir()?,
        config.context.project_context_file.clone(),
    ))
}

fn run_search(config: &Config, query: &str, limit: usize) -> anyhow::Result<()> {
    let searcher = load_searcher(config)?;
    let results = execute_query(&searcher, query, limit);
    println!("{}", format_results(&results));
    Ok(())
}

/// Route a query: only `/help` commands use the command map, any other
/// slash-prefixed query is an ordinary search.
fn execute_query<'a>(
    searcher: &'a DocSearcher,
    query: &str,
    limit: usize,
) -> Vec<ScoredChunk<'a>> {
    if query.starts_with("/help") {
        searcher.search_command(query)
    } else {
        searcher.search(query, limit)
    }
}

async fn run_review(
    config: &Config,
    diff_file: &std::path::Path,
    files_file: &std::path::Path,
    pr_info_file: &std::path::Path,
    docs_dir: &std::path::Path,
    output_file: &std::path::Path,
    review_config: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let diff = std::fs::read_to_string(diff_file)
        .with_context(|| format!("failed to read diff from {}", diff_file.display()))?;
    let file_contents = std::fs::read_to_string(files_file)
        .with_context(|| format!("failed to read files from {}", files_file.display()))?;
    let pr_info = std::fs::read_to_string(pr_info_file)
        .with_context(|| format!("failed to read PR info from {}", pr_info_file.display()))?;

    let review_config = match review_config {
        Some(path) => ReviewConfig::load(path)?,
        None => config.review.clone(),
    };

    let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") else {
        bail!("ANTHROPIC_API_KEY is not set");
    };

    let project_context = load_project_context(docs_dir)?;

    let provider = ClaudeProvider::new(
        api_key,
        review_config.model.clone(),
        review_config.max_tokens,
        review_config.temperature,
    );
    let assistant = ReviewAssistant::new(provider, review_config);

    match assistant
        .review(&diff, &file_contents, &pr_info, &project_context)
        .await
    {
        Ok(review) => {
            write_output(output_file, &review)?;
            let preview: String = review.chars().take(500).collect();
            println!("Review written to {}\n\n{preview}...", output_file.display());
            Ok(())
        }
        Err(docrag_review::ReviewError::Llm(err)) => {
            let report = render_error_report(&err);
            write_output(output_file, &report)?;
            eprintln!("{report}");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn write_output(path: &std::path::Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docrag_index::document::{ChunkMetadata, DocChunk, DocIndex};
    use std::collections::BTreeMap;

    fn searcher_with_chunks(contents: &[&str]) -> DocSearcher {
        let chunks: Vec<DocChunk> = contents
            .iter()
            .enumerate()
            .map(|(i, content)| {
                DocChunk::new(
                    "DOC.md".into(),
                    (*content).to_string(),
                    i,
                    ChunkMetadata {
                        section_title: "Section".into(),
                        section_level: 1,
                        file_path: "DOC.md".into(),
                    },
                    vec![],
                )
            })
            .collect();
        DocSearcher::new(DocIndex {
            total_chunks: chunks.len(),
            chunks,
            ..DocIndex::empty()
        })
    }

    #[test]
    fn missing_index_degrades_to_empty_searcher() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.index.output = dir.path().join("absent.json");

        let searcher = load_searcher_lenient(&config).unwrap();
        assert!(searcher.search("anything at all", 5).is_empty());
    }

    #[test]
    fn corrupt_index_still_errors_in_lenient_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        let mut config = Config::default();
        config.index.output = path;

        assert!(load_searcher_lenient(&config).is_err());
    }

    #[test]
    fn only_help_prefix_uses_command_map() {
        // four matching chunks: command-map routing would cap at 3
        let searcher = searcher_with_chunks(&[
            "foo details one",
            "foo details two",
            "foo details three",
            "foo details four",
        ]);
        let results = execute_query(&searcher, "/foo", 5);
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn help_prefix_routes_to_command_map() {
        let searcher = searcher_with_chunks(&[
            "koin one", "koin two", "koin three", "koin four",
        ]);
        let results = execute_query(&searcher, "/help koin", 5);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn top_keywords_sorted_by_count_then_name() {
        let mut map = BTreeMap::new();
        map.insert("Koin".to_string(), vec!["a".into(), "b".into()]);
        map.insert("Compose".to_string(), vec!["a".into(), "b".into()]);
        map.insert("Flow".to_string(), vec!["a".into()]);

        let top = top_keywords(&map, 10);
        assert_eq!(top[0], ("Compose", 2));
        assert_eq!(top[1], ("Koin", 2));
        assert_eq!(top[2], ("Flow", 1));
    }

    #[test]
    fn top_keywords_truncates() {
        let mut map = BTreeMap::new();
        for i in 0..15 {
            map.insert(format!("kw{i}"), vec!["id".into()]);
        }
        assert_eq!(top_keywords(&map, 10).len(), 10);
    }

    #[test]
    fn explicit_config_flag_wins() {
        let flag = PathBuf::from("custom.toml");
        assert_eq!(resolve_config_path(Some(&flag)), flag);
    }

    #[test]
    fn cli_parses_review_args() {
        let cli = Cli::try_parse_from([
            "docrag",
            "review",
            "--diff-file",
            "pr.diff",
            "--files-file",
            "files.txt",
            "--pr-info-file",
            "info.md",
            "--output-file",
            "out/review.md",
        ])
        .unwrap();
        match cli.command {
            Command::Review { docs_dir, .. } => assert_eq!(docs_dir, PathBuf::from("docs")),
            _ => panic!("expected review subcommand"),
        }
    }

    #[test]
    fn cli_parses_search_with_limit() {
        let cli = Cli::try_parse_from(["docrag", "search", "koin", "modules", "--limit", "2"])
            .unwrap();
        match cli.command {
            Command::Search { query, limit } => {
                assert_eq!(query.join(" "), "koin modules");
                assert_eq!(limit, 2);
            }
            _ => panic!("expected search subcommand"),
        }
    }
}
