//! `mdpreview sample` command implementation.

use clap::Args;
use mdpreview_renderer::render;

use super::write_fragment;
use crate::error::CliError;

/// Built-in sample document.
pub(crate) const SAMPLE_MARKDOWN: &str = r#"# Welcome to mdpreview!
```rust
// Code block example
fn greet(name: &str) {
    println!("Hello, {name}!");
}
```
Inline code: `let x = 10;`

## Features
- **Bold** and *italic* text
- [Links](https://commonmark.org)
1. Ordered
2. Lists
"#;

/// Arguments for the sample command.
#[derive(Args)]
pub(crate) struct SampleArgs {
    /// Print the rendered HTML fragment instead of the markdown.
    #[arg(long)]
    render: bool,
}

impl SampleArgs {
    /// Execute the sample command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        if self.render {
            write_fragment(None, &render(SAMPLE_MARKDOWN))
        } else {
            write_fragment(None, SAMPLE_MARKDOWN.trim_end())
        }
    }
}
