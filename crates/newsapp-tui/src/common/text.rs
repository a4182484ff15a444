//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Character drawn in place of each password character.
pub const MASK_CHAR: char = '•';

/// Replaces every character with [`MASK_CHAR`].
pub fn mask(text: &str) -> String {
    text.chars().map(|_| MASK_CHAR).collect()
}

/// Keeps the end of `text` that fits in `max_width` columns (unicode-aware).
///
/// Text inputs show their tail so the insertion point stays visible. A
/// leading `…` marks the cut.
pub fn tail_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut kept: Vec<char> = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        kept.push(ch);
    }
    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_counts_chars() {
        assert_eq!(mask("pässwd"), "••••••");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn test_tail_short_text_unchanged() {
        assert_eq!(tail_to_width("hello", 10), "hello");
        assert_eq!(tail_to_width("hello", 5), "hello");
    }

    #[test]
    fn test_tail_keeps_end() {
        assert_eq!(tail_to_width("reader@example.com", 8), "…ple.com");
    }

    #[test]
    fn test_tail_wide_chars() {
        // Each CJK character is two columns wide.
        assert_eq!(tail_to_width("日本語テキスト", 7), "…キスト");
    }

    #[test]
    fn test_tail_tiny_width() {
        assert_eq!(tail_to_width("hello", 1), "…");
    }
}
