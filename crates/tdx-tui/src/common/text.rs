//! Text utilities for TUI rendering.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds max_width (unicode-aware).
///
/// Wide characters (CJK, emoji) count by their terminal column width.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Flattens server-provided text onto one display line.
///
/// Newlines and tabs become spaces and escape bytes are dropped, so a task
/// title cannot break the row layout or inject terminal sequences.
pub fn single_line(s: &str) -> Cow<'_, str> {
    if s.contains(['\n', '\r', '\t', '\x1b']) {
        Cow::Owned(
            s.chars()
                .filter(|c| *c != '\x1b')
                .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}
