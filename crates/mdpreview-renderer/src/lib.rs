//! Markdown to HTML fragment renderer for live preview.
//!
//! Converts a restricted markdown dialect into an HTML fragment by running a
//! fixed sequence of independent rewrite stages over the whole text:
//!
//! 1. Code blocks: fenced blocks and inline spans ([`code_blocks`])
//! 2. Headings ([`headings`])
//! 3. Links ([`links`])
//! 4. Ordered lists ([`ordered_lists`])
//! 5. Unordered lists ([`unordered_lists`])
//! 6. Emphasis ([`emphasis`])
//!
//! Remaining newlines are then converted to `<br>`. There is no AST and no
//! error path: constructs that do not match are passed through as text.
//!
//! Code found by the first stage is kept out of reach of the later stages, so
//! `#`, `*`, `_` or `[` inside code are never reinterpreted.
//!
//! # Example
//!
//! ```
//! use mdpreview_renderer::{MarkdownTransformer, render};
//!
//! assert_eq!(
//!     render("**bold** and *italic*"),
//!     "<strong>bold</strong> and <em>italic</em>"
//! );
//!
//! let hardened = MarkdownTransformer::new().with_escaped_inline_code();
//! assert_eq!(hardened.render("`<br>`"), "<code>&lt;br&gt;</code>");
//! ```

mod code;
mod emphasis;
mod escape;
mod heading;
mod link;
mod list;
mod pipeline;

pub use code::{CodeStash, code_blocks, extract_code};
pub use emphasis::emphasis;
pub use escape::escape_html;
pub use heading::headings;
pub use link::links;
pub use list::{ListKind, ordered_lists, unordered_lists, wrap_list_runs};
pub use pipeline::{MarkdownTransformer, RenderOptions, Stage, render};
