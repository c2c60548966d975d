//! Repository state for context assembly.

use std::path::Path;

use tokio::process::Command;

/// Snapshot of the working tree used when assembling context.
#[derive(Debug, Clone, Default)]
pub struct GitContext {
    pub branch: String,
    pub modified_files: Vec<String>,
    pub recent_commits: Vec<String>,
}

impl GitContext {
    /// Collect branch, modified files, and recent commits from `root`.
    ///
    /// Any git failure degrades to `branch = "unknown"` and empty lists
    /// instead of erroring, so context assembly works outside a repo.
    pub async fn collect(root: &Path) -> Self {
        let branch = run_git(root, &["branch", "--show-current"])
            .await
            .map_or_else(|| "unknown".to_string(), |out| out.trim().to_string());

        let modified_files = run_git(root, &["status", "--short"])
            .await
            .map(|out| {
                out.lines()
                    // drop the two status columns and separator
                    .filter(|line| line.len() > 3)
                    .map(|line| line[3..].to_string())
                    .collect()
            })
            .unwrap_or_default();

        let recent_commits = run_git(root, &["log", "--oneline", "-5"])
            .await
            .map(|out| out.lines().map(ToString::to_string).collect())
            .unwrap_or_default();

        Self {
            branch,
            modified_files,
            recent_commits,
        }
    }
}

async fn run_git(root: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .await
        .ok()?;
    if !output.status.success() {
        tracing::debug!(?args, "git command failed");
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn non_repo_degrades_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = GitContext::collect(dir.path()).await;
        assert_eq!(ctx.branch, "unknown");
        assert!(ctx.modified_files.is_empty());
        assert!(ctx.recent_commits.is_empty());
    }
}
