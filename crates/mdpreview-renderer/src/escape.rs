//! HTML escaping.

/// Escape HTML special characters in `s`.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with their entities. Every character
/// is mapped exactly once, so the `&` of an entity produced here is never
/// escaped a second time.
///
/// # Examples
///
/// ```
/// use mdpreview_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b && 'c'"), "a &lt; b &amp;&amp; &#039;c&#039;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<div>"), "&lt;div&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_html("it's"), "it&#039;s");
    }

    #[test]
    fn test_escape_html_existing_entity_is_escaped_once() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("plain text # * _ [ ]"), "plain text # * _ [ ]");
    }

    #[test]
    fn test_escape_html_empty() {
        assert_eq!(escape_html(""), "");
    }
}
