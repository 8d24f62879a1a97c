// src/utils/text.rs

//! Grapheme-aware text splitting.

use unicode_segmentation::UnicodeSegmentation;

/// Split `message` into chunks of at most `max_graphemes`
/// user-perceived characters.
///
/// Boundaries fall only between extended grapheme clusters, so emoji
/// with modifiers, flags, and combining sequences are never cut
/// apart. Packing is greedy, which also makes the chunk count
/// minimal, and the chunks concatenate back to the input exactly.
/// An empty message yields no chunks. `max_graphemes` must be at
/// least 1.
pub fn split_graphemes(message: &str, max_graphemes: usize) -> Vec<String> {
    debug_assert!(max_graphemes >= 1);

    message
        .graphemes(true)
        .collect::<Vec<_>>()
        .chunks(max_graphemes)
        .map(|chunk| chunk.concat())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        assert_eq!(split_graphemes("abcdef", 2), vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn test_uneven_tail() {
        assert_eq!(split_graphemes("abcde", 2), vec!["ab", "cd", "e"]);
    }

    #[test]
    fn test_short_message_is_one_chunk() {
        assert_eq!(split_graphemes("こんにちは", 500), vec!["こんにちは"]);
    }

    #[test]
    fn test_empty_message_yields_no_chunks() {
        assert!(split_graphemes("", 2).is_empty());
    }

    #[test]
    fn test_never_splits_inside_a_cluster() {
        // Regional-indicator pairs and ZWJ sequences are single
        // clusters even though they span several code points.
        assert_eq!(split_graphemes("🇯🇵🇺🇸", 1), vec!["🇯🇵", "🇺🇸"]);
        assert_eq!(split_graphemes("👩‍👩‍👧", 1), vec!["👩‍👩‍👧"]);
        assert_eq!(split_graphemes("e\u{301}x", 1), vec!["e\u{301}", "x"]);
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let message = "A日本語🇯🇵 text with 👩‍👩‍👧 and e\u{301} in it";
        for max in 1..=8 {
            let chunks = split_graphemes(message, max);
            assert_eq!(chunks.concat(), message);
            for chunk in &chunks {
                assert!(chunk.graphemes(true).count() <= max);
            }
        }
    }

    #[test]
    fn test_chunk_count_is_minimal() {
        // No pair of adjacent chunks could be merged without
        // exceeding the limit.
        let chunks = split_graphemes("abcdefg", 3);
        assert_eq!(chunks, vec!["abc", "def", "g"]);
        for pair in chunks.windows(2) {
            let merged = format!("{}{}", pair[0], pair[1]);
            assert!(merged.graphemes(true).count() > 3);
        }
    }
}
