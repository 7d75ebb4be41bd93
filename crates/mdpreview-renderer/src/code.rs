//! Fenced code blocks and inline code spans.
//!
//! Code is recognized before any other construct. During a full render the
//! finished HTML is parked in a [`CodeStash`] and the buffer carries only
//! opaque placeholders, so later stages never see the markup characters of
//! code content. The stash is restored right before newlines become `<br>`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_html;

/// Opening fence with an optional language tag, then the shortest body up to
/// the next triple backtick.
static FENCED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9_]*)\n(.*?)```").expect("invalid fenced code regex")
});

/// Single-line span between two backticks.
static INLINE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("invalid inline code regex"));

// Private-use code points matched by none of the later patterns. Any that
// already occur in the source are parked as literal fragments first.
const PLACEHOLDER_START: char = '\u{E000}';
const PLACEHOLDER_END: char = '\u{E001}';

/// Rendered code fragments waiting to be put back into the buffer.
///
/// Each fragment is referenced from the text by a placeholder holding its
/// index. See [`extract_code`] and [`CodeStash::restore`].
#[derive(Debug, Default)]
pub struct CodeStash {
    fragments: Vec<String>,
}

impl CodeStash {
    /// Create an empty stash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of parked fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if no fragment has been parked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Store a finished fragment and return the placeholder that stands for it.
    fn park(&mut self, html: String) -> String {
        let index = self.fragments.len();
        self.fragments.push(html);
        format!("{PLACEHOLDER_START}{index}{PLACEHOLDER_END}")
    }

    /// Replace every placeholder in `text` with its fragment in a single pass.
    ///
    /// Fragments may hold placeholders issued before them (a literal marker
    /// inside a fenced body, a fenced block inside an inline span); those are
    /// expanded too. A placeholder whose index is unknown to this stash is
    /// kept as-is.
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        if self.fragments.is_empty() {
            return text.to_owned();
        }

        let mut result = String::with_capacity(text.len());
        self.restore_into(text, self.fragments.len(), &mut result);
        result
    }

    /// Expand placeholders with an index below `limit` into `result`.
    fn restore_into(&self, text: &str, limit: usize, result: &mut String) {
        let mut remaining = text;

        while let Some(start) = remaining.find(PLACEHOLDER_START) {
            result.push_str(&remaining[..start]);
            let after_start = &remaining[start + PLACEHOLDER_START.len_utf8()..];

            let fragment = after_start.find(PLACEHOLDER_END).and_then(|end| {
                let index = after_start[..end].parse::<usize>().ok()?;
                let html = self.fragments.get(index).filter(|_| index < limit)?;
                Some((index, html, end))
            });

            if let Some((index, html, end)) = fragment {
                self.restore_into(html, index, result);
                remaining = &after_start[end + PLACEHOLDER_END.len_utf8()..];
            } else {
                result.push(PLACEHOLDER_START);
                remaining = after_start;
            }
        }

        result.push_str(remaining);
    }

    /// Park every placeholder marker already present in `text`.
    fn protect_markers(&mut self, text: &str) -> String {
        let mut protected = String::with_capacity(text.len());
        for c in text.chars() {
            if c == PLACEHOLDER_START {
                protected.push_str(&self.park(c.to_string()));
            } else {
                protected.push(c);
            }
        }
        protected
    }
}

/// Replace fenced blocks, then inline spans, with placeholders.
///
/// Returns the placeholder text and the stash holding the rendered HTML.
/// Fenced bodies are trimmed and escaped; inline content is escaped only
/// when `escape_inline` is set.
pub fn extract_code(text: &str, escape_inline: bool) -> (String, CodeStash) {
    let mut stash = CodeStash::new();

    let protected;
    let text = if text.contains(PLACEHOLDER_START) {
        protected = stash.protect_markers(text);
        protected.as_str()
    } else {
        text
    };

    let text = FENCED_PATTERN.replace_all(text, |caps: &Captures| {
        stash.park(fenced_html(&caps[1], &caps[2]))
    });
    let text = INLINE_PATTERN.replace_all(&text, |caps: &Captures| {
        stash.park(inline_html(&caps[1], escape_inline))
    });

    (text.into_owned(), stash)
}

/// Render code blocks and inline code spans.
///
/// Standalone form of the code stage: extraction and restoration happen in
/// one step.
///
/// # Examples
///
/// ```
/// use mdpreview_renderer::code_blocks;
///
/// assert_eq!(
///     code_blocks("```sh\necho <hi>\n```"),
///     r#"<pre><code class="sh">echo &lt;hi&gt;</code></pre>"#
/// );
/// assert_eq!(code_blocks("run `make`"), "run <code>make</code>");
/// ```
pub fn code_blocks(text: &str) -> String {
    let (text, stash) = extract_code(text, false);
    stash.restore(&text)
}

fn fenced_html(lang: &str, body: &str) -> String {
    format!(
        r#"<pre><code class="{lang}">{}</code></pre>"#,
        escape_html(body.trim())
    )
}

fn inline_html(content: &str, escape: bool) -> String {
    if escape {
        format!("<code>{}</code>", escape_html(content))
    } else {
        format!("<code>{content}</code>")
    }
}
