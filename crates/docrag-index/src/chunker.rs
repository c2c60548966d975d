//! Fixed-size overlapping text chunking with boundary-aware breaks.

/// Chunker configuration.
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Target chunk size in characters (default: 512).
    pub chunk_size: usize,
    /// Characters of overlap between consecutive chunks (default: 50).
    pub overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 512,
            overlap: 50,
        }
    }
}

/// Split text into overlapping chunks of roughly `chunk_size` characters.
///
/// Non-terminal windows prefer to break at the last sentence end (`.`) or
/// paragraph break (`\n\n`) inside the window, but only when that break
/// point is past half the window; otherwise a hard cut keeps chunks from
/// collapsing. Each chunk is trimmed; whitespace-only chunks are dropped.
/// The scan always moves forward, even when `overlap >= chunk_size`.
#[must_use]
pub fn split_text(text: &str, config: &ChunkerConfig) -> Vec<String> {
    // Char-indexed view so window arithmetic never lands inside a UTF-8
    // sequence.
    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let total = offsets.len();
    let byte_at = |c: usize| {
        if c >= total {
            text.len()
        } else {
            offsets[c]
        }
    };

    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < total {
        let terminal = start + config.chunk_size >= total;
        let mut end = if terminal {
            total
        } else {
            start + config.chunk_size
        };

        if !terminal {
            let window = &text[byte_at(start)..byte_at(end)];
            if let Some(break_chars) = find_break(window)
                && break_chars * 2 > config.chunk_size
            {
                end = start + break_chars + 1;
            }
        }

        let piece = text[byte_at(start)..byte_at(end)].trim();
        if !piece.is_empty() {
            chunks.push(piece.to_string());
        }

        start = if end < total {
            end.saturating_sub(config.overlap).max(start + 1)
        } else {
            end
        };
    }

    chunks
}

/// Char index of the preferred break point in a window: the later of the
/// last `.` and the last paragraph break.
fn find_break(window: &str) -> Option<usize> {
    let last_period = window.rfind('.');
    let last_para = window.rfind("\n\n");
    let byte_pos = match (last_period, last_para) {
        (Some(p), Some(n)) => p.max(n),
        (Some(p), None) => p,
        (None, Some(n)) => n,
        (None, None) => return None,
    };
    Some(window[..byte_pos].chars().count())
}
