//! Small text helpers shared by the scraper and the HTTP layer.

use itertools::Itertools;

/// Collapse every run of whitespace (including newlines from nested markup)
/// into a single space and trim the ends.
///
/// # Examples
///
/// ```
/// use headline_notes::utils::normalize_text;
///
/// assert_eq!(normalize_text("  Breaking\n   news "), "Breaking news");
/// ```
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace().join(" ")
}

/// Normalise `s` and map an empty result to `None`.
pub fn non_empty_text(s: &str) -> Option<String> {
    let text = normalize_text(s);
    if text.is_empty() { None } else { Some(text) }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut after `max` characters with an ellipsis and a count
/// of the dropped bytes appended. Cuts always land on a char boundary.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("  Breaking\n\t  news  "), "Breaking news");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_non_empty_text() {
        assert_eq!(non_empty_text(" \n "), None);
        assert_eq!(non_empty_text(" a  b "), Some("a b".to_string()));
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        let s = "“quoted” teaser";
        let result = truncate_for_log(s, 1);
        assert!(result.starts_with('“'));
        assert!(result.ends_with("bytes)"));
    }
}
