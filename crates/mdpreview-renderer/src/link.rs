//! Inline link recognition.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_html;

/// `[text](url)` with non-empty text and url.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("invalid link regex"));

/// Convert every `[text](url)` into an anchor.
///
/// Text and URL are inserted verbatim.
///
/// # Examples
///
/// ```
/// use mdpreview_renderer::links;
///
/// assert_eq!(
///     links("see [docs](https://example.com)"),
///     r#"see <a href="https://example.com">docs</a>"#
/// );
/// ```
pub fn links(text: &str) -> String {
    rewrite_links(text, false)
}

/// Convert links, escaping text and URL when `escape` is set.
pub(crate) fn rewrite_links(text: &str, escape: bool) -> String {
    LINK_PATTERN
        .replace_all(text, |caps: &Captures| {
            if escape {
                format!(
                    r#"<a href="{}">{}</a>"#,
                    escape_html(&caps[2]),
                    escape_html(&caps[1])
                )
            } else {
                format!(r#"<a href="{}">{}</a>"#, &caps[2], &caps[1])
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_simple_link() {
        assert_eq!(links("[x](http://y)"), r#"<a href="http://y">x</a>"#);
    }

    #[test]
    fn test_multiple_links_on_one_line() {
        assert_eq!(
            links("[a](1) and [b](2)"),
            r#"<a href="1">a</a> and <a href="2">b</a>"#
        );
    }

    #[test]
    fn test_links_on_several_lines() {
        assert_eq!(
            links("- [a](1)\n- [b](2)"),
            "- <a href=\"1\">a</a>\n- <a href=\"2\">b</a>"
        );
    }

    #[test]
    fn test_no_url_validation() {
        assert_eq!(
            links("[run](javascript:void)"),
            r#"<a href="javascript:void">run</a>"#
        );
    }

    #[test]
    fn test_incomplete_link_passes_through() {
        assert_eq!(links("[text]("), "[text](");
        assert_eq!(links("[text]"), "[text]");
        assert_eq!(links("[](url)"), "[](url)");
    }

    #[test]
    fn test_fields_are_not_escaped_by_default() {
        assert_eq!(links(r#"[<i>](a"b)"#), r#"<a href="a"b"><i></a>"#);
    }

    #[test]
    fn test_fields_escaped_on_request() {
        assert_eq!(
            rewrite_links(r#"[<i>](a"b)"#, true),
            r#"<a href="a&quot;b">&lt;i&gt;</a>"#
        );
    }
}
