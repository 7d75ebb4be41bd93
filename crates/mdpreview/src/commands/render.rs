//! `mdpreview render` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdpreview_config::CliSettings;

use super::{load_config, read_source, transformer, write_fragment};
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (reads stdin when omitted or `-`).
    file: Option<PathBuf>,

    /// Write the HTML fragment to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdpreview.toml).
    #[arg(short, long, env = "MDPREVIEW_CONFIG")]
    config: Option<PathBuf>,

    /// Escape inline code content (overrides config).
    #[arg(long)]
    escape_inline_code: bool,

    /// Escape link text and URL (overrides config).
    #[arg(long)]
    escape_links: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read
    /// or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            escape_inline_code: self.escape_inline_code.then_some(true),
            escape_links: self.escape_links.then_some(true),
            ..Default::default()
        };
        let config = load_config(self.config.as_deref(), &cli_settings)?;

        let source = read_source(self.file.as_deref())?;
        let html = transformer(&config.render).render(&source);
        tracing::info!(
            input_bytes = source.len(),
            output_bytes = html.len(),
            "Rendered markdown"
        );

        write_fragment(self.output.as_deref(), &html)
    }
}
