//! Word and character counts reported alongside extracted text.

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Number of Unicode scalar values, not bytes.
pub fn char_count(text: &str) -> u64 {
    text.chars().count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_ignores_runs_of_whitespace() {
        assert_eq!(word_count("Hello world"), 2);
        assert_eq!(word_count("  a \n\t b  c "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_char_count_counts_scalars() {
        assert_eq!(char_count("héllo"), 5);
        assert_eq!(char_count("Hello world"), 11);
    }
}
