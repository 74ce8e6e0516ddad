//! Minimum-length gate for search text.

/// What input capture should do with the current text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchAction {
    /// Schedule a debounced "text changed" intent carrying this trimmed text.
    Schedule(String),
    /// Text is too short: cancel any pending send and clear options now.
    /// Clearing must be instant so stale results never linger.
    Clear,
}

/// Classify the raw input text against the configured minimum length.
///
/// Length is counted in `char`s of the trimmed text so multi-byte input is
/// not over-counted.
pub fn classify(text: &str, min_len: usize) -> SearchAction {
    let trimmed = text.trim();
    if trimmed.chars().count() >= min_len {
        SearchAction::Schedule(trimmed.to_string())
    } else {
        SearchAction::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_clears() {
        assert_eq!(classify("ab", 3), SearchAction::Clear);
        assert_eq!(classify("", 3), SearchAction::Clear);
    }

    #[test]
    fn whitespace_does_not_count_toward_length() {
        assert_eq!(classify("  ab  ", 3), SearchAction::Clear);
        assert_eq!(
            classify("  abc  ", 3),
            SearchAction::Schedule("abc".to_string())
        );
    }

    #[test]
    fn length_is_measured_in_chars_not_bytes() {
        // Three chars, nine bytes.
        assert_eq!(
            classify("€€€", 3),
            SearchAction::Schedule("€€€".to_string())
        );
        assert_eq!(classify("€€", 3), SearchAction::Clear);
    }

    #[test]
    fn zero_min_len_always_schedules() {
        assert_eq!(classify("", 0), SearchAction::Schedule(String::new()));
    }
}
