//! Common utilities and text helpers

pub mod error;
pub mod retry;

pub use error::{FeedError, NormalizeError, SynthesisError};
pub use retry::RetryConfig;

use std::sync::OnceLock;

use regex::Regex;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(s: &str) -> String {
    whitespace_re().replace_all(s.trim(), " ").into_owned()
}

/// Comparison key for near-duplicate title detection
///
/// Case-insensitive, whitespace-collapsed, punctuation stripped. Two items
/// with the same key are treated as the same story.
pub fn title_key(title: &str) -> String {
    let lowered = title.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    collapse_whitespace(&cleaned)
}

/// Truncate to at most `max` characters, appending an ellipsis when cut
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Upper-camel-case a keyword for hashtag use, e.g. "ai agents" -> "AiAgents"
pub fn pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Lowercase, squashed form of a keyword for hashtag use
pub fn squash_case(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_title_key_normalizes() {
        assert_eq!(
            title_key("AI Agent  Builds Website!"),
            title_key("ai agent builds website")
        );
        assert_eq!(title_key("Rust 1.80: What's New?"), "rust 1 80 what s new");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        let cut = truncate_chars("a very long sentence indeed", 10);
        assert!(cut.chars().count() <= 10);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_hashtag_casing() {
        assert_eq!(pascal_case("ai agents"), "AiAgents");
        assert_eq!(pascal_case("no-code"), "NoCode");
        assert_eq!(squash_case("No-Code"), "nocode");
    }
}
