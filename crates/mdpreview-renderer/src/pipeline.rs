//! Ordered rewrite pipeline.

use crate::code::{CodeStash, code_blocks, extract_code};
use crate::emphasis::emphasis;
use crate::heading::headings;
use crate::link::{links, rewrite_links};
use crate::list::{ordered_lists, unordered_lists};

/// A single rewrite stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fenced code blocks and inline code spans.
    CodeBlocks,
    /// ATX headings.
    Headings,
    /// Inline links.
    Links,
    /// Runs of `1.` items.
    OrderedLists,
    /// Runs of `-` items.
    UnorderedLists,
    /// Bold, then italic.
    Emphasis,
}

impl Stage {
    /// Stages in the order [`MarkdownTransformer::render`] applies them.
    pub const PIPELINE: [Stage; 6] = [
        Stage::CodeBlocks,
        Stage::Headings,
        Stage::Links,
        Stage::OrderedLists,
        Stage::UnorderedLists,
        Stage::Emphasis,
    ];

    /// Stable identifier used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CodeBlocks => "code_blocks",
            Self::Headings => "headings",
            Self::Links => "links",
            Self::OrderedLists => "ordered_lists",
            Self::UnorderedLists => "unordered_lists",
            Self::Emphasis => "emphasis",
        }
    }

    /// Run this stage on its own with default options.
    ///
    /// Unlike a full render, the code stage emits its HTML directly.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::CodeBlocks => code_blocks(text),
            Self::Headings => headings(text),
            Self::Links => links(text),
            Self::OrderedLists => ordered_lists(text),
            Self::UnorderedLists => unordered_lists(text),
            Self::Emphasis => emphasis(text),
        }
    }
}

/// Output hardening switches.
///
/// Both are off by default: inline code and link fields are interpolated
/// verbatim, only fenced code bodies are escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Escape the content of inline code spans.
    pub escape_inline_code: bool,
    /// Escape link text and URL.
    pub escape_links: bool,
}

/// Markdown to HTML fragment transformer.
///
/// Holds only options; every call to [`render`](Self::render) is a full,
/// independent pass over its input.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownTransformer {
    options: RenderOptions,
}

impl MarkdownTransformer {
    /// Create a transformer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transformer with the given options.
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Escape the content of inline code spans.
    #[must_use]
    pub fn with_escaped_inline_code(mut self) -> Self {
        self.options.escape_inline_code = true;
        self
    }

    /// Escape link text and URL.
    #[must_use]
    pub fn with_escaped_links(mut self) -> Self {
        self.options.escape_links = true;
        self
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Render `source` to an HTML fragment.
    ///
    /// Runs [`Stage::PIPELINE`] in order, puts code back in place, then turns
    /// every newline into `<br>`.
    pub fn render(&self, source: &str) -> String {
        let mut stash = CodeStash::new();
        let mut text = source.to_owned();

        for stage in Stage::PIPELINE {
            text = match stage {
                Stage::CodeBlocks => {
                    let (extracted, parked) = extract_code(&text, self.options.escape_inline_code);
                    stash = parked;
                    extracted
                }
                Stage::Links => rewrite_links(&text, self.options.escape_links),
                other => other.apply(&text),
            };
            tracing::trace!(stage = stage.name(), len = text.len(), "Applied stage");
        }

        tracing::trace!(code_fragments = stash.len(), "Restoring code");
        stash.restore(&text).replace('\n', "<br>")
    }
}

/// Render `source` to an HTML fragment with default options.
///
/// # Examples
///
/// ```
/// use mdpreview_renderer::render;
///
/// assert_eq!(render("# Title"), "<h1>Title</h1>");
/// assert_eq!(render(""), "");
/// ```
pub fn render(source: &str) -> String {
    MarkdownTransformer::new().render(source)
}
