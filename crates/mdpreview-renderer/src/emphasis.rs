//! Bold and italic recognition.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("invalid bold regex"));
static BOLD_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.*?)__").expect("invalid bold regex"));
static ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("invalid italic regex"));
static ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_\n]+)_").expect("invalid italic regex"));

/// Convert `**x**` / `__x__` to `<strong>` and `*x*` / `_x_` to `<em>`.
///
/// Both bold rules run before the italic rules so that a double marker is
/// never consumed as two single ones. Matches never cross a newline.
///
/// # Examples
///
/// ```
/// use mdpreview_renderer::emphasis;
///
/// assert_eq!(
///     emphasis("**bold** and *italic*"),
///     "<strong>bold</strong> and <em>italic</em>"
/// );
/// ```
pub fn emphasis(text: &str) -> String {
    let text = BOLD_STAR.replace_all(text, "<strong>${1}</strong>");
    let text = BOLD_UNDERSCORE.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC_STAR.replace_all(&text, "<em>${1}</em>");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "<em>${1}</em>");
    text.into_owned()
}
