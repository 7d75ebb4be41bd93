//! Ordered and unordered list recognition.
//!
//! Both list kinds share one line-by-line run wrapper. Each kind is a separate
//! full pass over the text; a pass opens a list at the first item line of a
//! run and closes it at the first non-item line (or at end of input).

use std::sync::LazyLock;

use regex::Regex;

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s").expect("invalid ordered item regex"));
static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s").expect("invalid unordered item regex"));

/// Kind of list recognized by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `1. item` lines wrapped in `<ol>`.
    Ordered,
    /// `- item` lines wrapped in `<ul>`.
    Unordered,
}

impl ListKind {
    fn item_pattern(self) -> &'static Regex {
        match self {
            Self::Ordered => &ORDERED_ITEM,
            Self::Unordered => &UNORDERED_ITEM,
        }
    }

    /// Opening tag of the list element.
    #[must_use]
    pub fn open_tag(self) -> &'static str {
        match self {
            Self::Ordered => "<ol>",
            Self::Unordered => "<ul>",
        }
    }

    /// Closing tag of the list element.
    #[must_use]
    pub fn close_tag(self) -> &'static str {
        match self {
            Self::Ordered => "</ol>",
            Self::Unordered => "</ul>",
        }
    }

    /// Trimmed item content of `line`, or `None` if it is not an item of this kind.
    #[must_use]
    pub fn item_content(self, line: &str) -> Option<&str> {
        let prefix = self.item_pattern().find(line)?;
        Some(line[prefix.end()..].trim())
    }
}

/// Wrap every run of `kind` item lines in a list element.
///
/// The opening tag is prepended to the first item of a run and the closing
/// tag to the first line after it. A run still open at end of input is
/// closed by an extra final line. Blank lines are ordinary non-item lines.
pub fn wrap_list_runs(text: &str, kind: ListKind) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut in_list = false;

    for line in text.split('\n') {
        match (kind.item_content(line), in_list) {
            (Some(content), false) => {
                in_list = true;
                lines.push(format!("{}<li>{content}</li>", kind.open_tag()));
            }
            (Some(content), true) => lines.push(format!("<li>{content}</li>")),
            (None, true) => {
                in_list = false;
                lines.push(format!("{}{line}", kind.close_tag()));
            }
            (None, false) => lines.push(line.to_owned()),
        }
    }

    if in_list {
        lines.push(kind.close_tag().to_owned());
    }

    lines.join("\n")
}

/// Wrap runs of `1. item` lines in `<ol>`.
///
/// # Examples
///
/// ```
/// use mdpreview_renderer::ordered_lists;
///
/// assert_eq!(
///     ordered_lists("1. one\n2. two\ndone"),
///     "<ol><li>one</li>\n<li>two</li>\n</ol>done"
/// );
/// ```
pub fn ordered_lists(text: &str) -> String {
    wrap_list_runs(text, ListKind::Ordered)
}

/// Wrap runs of `- item` lines in `<ul>`.
///
/// # Examples
///
/// ```
/// use mdpreview_renderer::unordered_lists;
///
/// assert_eq!(
///     unordered_lists("- a\n- b"),
///     "<ul><li>a</li>\n<li>b</li>\n</ul>"
/// );
/// ```
pub fn unordered_lists(text: &str) -> String {
    wrap_list_runs(text, ListKind::Unordered)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_item_content() {
        assert_eq!(ListKind::Unordered.item_content("- a "), Some("a"));
        assert_eq!(ListKind::Unordered.item_content("-a"), None);
        assert_eq!(ListKind::Unordered.item_content(" - a"), None);
        assert_eq!(ListKind::Ordered.item_content("12. twelve"), Some("twelve"));
        assert_eq!(ListKind::Ordered.item_content("1.no"), None);
        assert_eq!(ListKind::Ordered.item_content("- a"), None);
        assert_eq!(ListKind::Unordered.item_content("1. a"), None);
    }

    #[test]
    fn test_list_closed_by_text_line() {
        assert_eq!(
            unordered_lists("- a\n- b\nafter"),
            "<ul><li>a</li>\n<li>b</li>\n</ul>after"
        );
    }

    #[test]
    fn test_list_closed_at_end_of_input() {
        assert_eq!(unordered_lists("- only"), "<ul><li>only</li>\n</ul>");
    }

    #[test]
    fn test_text_before_list_untouched() {
        assert_eq!(
            ordered_lists("intro\n1. first"),
            "intro\n<ol><li>first</li>\n</ol>"
        );
    }

    #[test]
    fn test_blank_line_splits_runs() {
        assert_eq!(
            unordered_lists("- a\n\n- b"),
            "<ul><li>a</li>\n</ul>\n<ul><li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_item_content_is_trimmed() {
        assert_eq!(ordered_lists("1.   spaced   "), "<ol><li>spaced</li>\n</ol>");
    }

    #[test]
    fn test_numbering_is_not_checked() {
        assert_eq!(
            ordered_lists("3. c\n1. a"),
            "<ol><li>c</li>\n<li>a</li>\n</ol>"
        );
    }

    #[test]
    fn test_passes_ignore_other_kind() {
        let input = "- a\n1. b";
        assert_eq!(ordered_lists(input), "- a\n<ol><li>b</li>\n</ol>");
        assert_eq!(unordered_lists(input), "<ul><li>a</li>\n</ul>1. b");
    }

    #[test]
    fn test_no_items_is_identity() {
        assert_eq!(unordered_lists("plain\ntext\n"), "plain\ntext\n");
        assert_eq!(ordered_lists(""), "");
    }
}
