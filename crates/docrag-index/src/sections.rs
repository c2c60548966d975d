//! Markdown section extraction: split a document on ATX headers.

/// A header-delimited region of a markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub content: String,
    pub level: usize,
}

/// Split markdown into sections on `#{1,6}` headers.
///
/// Text before the first header falls into an implicit `Introduction`
/// section at level 0. The header line stays at the top of its section so
/// chunks keep their heading. Whitespace-only sections are dropped.
#[must_use]
pub fn extract_sections(content: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section {
        title: "Introduction".to_string(),
        content: String::new(),
        level: 0,
    };

    for line in content.lines() {
        if let Some((level, title)) = parse_header(line) {
            if !current.content.trim().is_empty() {
                sections.push(current);
            }
            current = Section {
                title,
                content: format!("{line}\n"),
                level,
            };
        } else {
            current.content.push_str(line);
            current.content.push('\n');
        }
    }

    if !current.content.trim().is_empty() {
        sections.push(current);
    }

    sections
}

/// Parse an ATX header line into (level, title). At most six `#`, and the
/// marker must be followed by whitespace and a non-empty title.
fn parse_header(line: &str) -> Option<(usize, String)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    let title = rest.trim();
    if title.is_empty() {
        return None;
    }
    Some((hashes, title.to_string()))
}
