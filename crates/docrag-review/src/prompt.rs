//! Review prompt construction.

use std::path::Path;

use crate::error::Result;

const MAX_CONTEXT_CHARS: usize = 15_000;
const MAX_DIFF_CHARS: usize = 20_000;
const MAX_FILES_CHARS: usize = 30_000;

/// Documentation files folded into the review prompt, in priority order.
const PRIORITY_FILES: &[&str] = &[
    "ARCHITECTURE.md",
    "PROJECT_STATUS.md",
    "QUICKSTART.md",
    "INDEX.md",
];

/// Concatenate the priority documentation files that exist under
/// `docs_dir`, each under a `### {filename}` header. Empty string when the
/// directory is missing.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read.
pub fn load_project_context(docs_dir: &Path) -> Result<String> {
    if !docs_dir.exists() {
        return Ok(String::new());
    }

    let mut parts = Vec::new();
    for filename in PRIORITY_FILES {
        let path = docs_dir.join(filename);
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            parts.push(format!("### {filename}\n{content}\n"));
        }
    }

    Ok(parts.join("\n\n"))
}

/// Build the single user-message review prompt from the PR inputs.
#[must_use]
pub fn build_review_prompt(
    diff: &str,
    file_contents: &str,
    pr_info: &str,
    project_context: &str,
) -> String {
    format!(
        r"You are a code review assistant for a Kotlin Multiplatform project built on Clean Architecture.

## Pull Request

{pr_info}

## Project Documentation

{context}

## Diff

```diff
{diff}
```

## Changed Files (full contents)

{files}

---

## Your Task

Review the changes as a senior Kotlin/KMP developer, covering:

### 1. Architecture
- Adherence to the project's patterns (Repository, Use Case, ViewModel)
- Layer separation (presentation / domain / data)
- SOLID and dependency inversion
- Feature slicing

### 2. Kotlin/KMP practices
- Correct coroutine usage (Flow, suspend functions)
- Null safety, immutability, type safety
- Platform independence (expect/actual)

### 3. Compose Multiplatform
- State management (StateFlow, remember, derivedStateOf)
- Recomposition cost and side effects (LaunchedEffect, DisposableEffect)

### 4. Potential problems
- Memory leaks (viewModelScope, lifecycle), thread safety, race conditions
- Error handling and edge cases

### 5. Project code style
- Naming conventions, file structure, documentation, testability

## Response Format

Respond in Markdown with these sections:

# Code Review Summary

## Overall Assessment
- **Critical issues:** X
- **Important notes:** Y
- **Suggestions:** Z

## Key Findings
Two or three most important points, briefly.

## Detailed Notes

### Critical Issues
For each: **[file:line]** - category, the problem, why it matters (with a
pointer to the project docs where relevant), and a suggested fix as a fenced
Kotlin snippet.

### Important Notes

### Suggestions

## Done Well
One to three positive points.

Tone: constructive, explain why and not just what, phrase debatable points
as questions. Priorities: critical for bugs, leaks, and architecture
violations; important for code smells and suboptimal solutions; suggestion
for improvements and refactoring.

Begin the review.",
        context = truncate_chars(project_context, MAX_CONTEXT_CHARS),
        diff = truncate_chars(diff, MAX_DIFF_CHARS),
        files = truncate_chars(file_contents, MAX_FILES_CHARS),
    )
}

/// Truncate to at most `max` characters, on a char boundary.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((byte_pos, _)) => &s[..byte_pos],
        None => s,
    }
}
