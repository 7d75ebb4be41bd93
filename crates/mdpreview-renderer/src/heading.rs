//! ATX heading recognition.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// One to six hashes at line start, one non-newline whitespace character,
/// then the rest of the line.
static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})[^\S\n](.+)$").expect("invalid heading regex"));

/// Convert `#`-prefixed lines to `<h1>` through `<h6>`.
///
/// The level is the number of leading hashes. Lines with seven or more
/// hashes, or without whitespace after the hashes, are left untouched.
///
/// # Examples
///
/// ```
/// use mdpreview_renderer::headings;
///
/// assert_eq!(headings("## Setup"), "<h2>Setup</h2>");
/// assert_eq!(headings("#hashtag"), "#hashtag");
/// ```
pub fn headings(text: &str) -> String {
    HEADING_PATTERN
        .replace_all(text, |caps: &Captures| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", caps[2].trim())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_all_levels() {
        for level in 1..=6 {
            let input = format!("{} Title", "#".repeat(level));
            assert_eq!(headings(&input), format!("<h{level}>Title</h{level}>"));
        }
    }

    #[test]
    fn test_seven_hashes_not_a_heading() {
        assert_eq!(headings("####### Too deep"), "####### Too deep");
    }

    #[test]
    fn test_missing_space_not_a_heading() {
        assert_eq!(headings("#Title"), "#Title");
    }

    #[test]
    fn test_content_is_trimmed() {
        assert_eq!(headings("#   Spaced out   "), "<h1>Spaced out</h1>");
    }

    #[test]
    fn test_tab_separator() {
        assert_eq!(headings("##\tTabbed"), "<h2>Tabbed</h2>");
    }

    #[test]
    fn test_only_line_start_matches() {
        assert_eq!(headings("see # not heading"), "see # not heading");
    }

    #[test]
    fn test_each_line_independent() {
        assert_eq!(
            headings("# One\ntext\n### Three"),
            "<h1>One</h1>\ntext\n<h3>Three</h3>"
        );
    }

    #[test]
    fn test_heading_does_not_span_lines() {
        assert_eq!(headings("#\nTitle"), "#\nTitle");
    }
}
