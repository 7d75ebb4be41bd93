//! `mdpreview watch` command implementation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use mdpreview_config::CliSettings;
use mdpreview_renderer::MarkdownTransformer;

use super::{load_config, read_source, transformer, write_fragment};
use crate::error::CliError;
use crate::output::Output;
use crate::watcher::{ChangeKind, FileWatcher};

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    /// Markdown file to watch.
    file: PathBuf,

    /// Write the HTML fragment to this file (overrides config; default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdpreview.toml).
    #[arg(short, long, env = "MDPREVIEW_CONFIG")]
    config: Option<PathBuf>,

    /// Quiet period in milliseconds before re-rendering (overrides config).
    #[arg(long)]
    debounce_ms: Option<u64>,

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

impl WatchArgs {
    /// Execute the watch command.
    ///
    /// Renders once, then re-renders the whole file after every debounced
    /// change until the watcher stops.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the first render fails, or
    /// the file watcher cannot be started.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            escape_inline_code: self.escape_inline_code.then_some(true),
            escape_links: self.escape_links.then_some(true),
            debounce_ms: self.debounce_ms,
            output: self.output,
        };
        let config = load_config(self.config.as_deref(), &cli_settings)?;
        let transformer = transformer(&config.render);
        let target = config.watch_resolved.output.as_deref();

        render_file(&transformer, &self.file, target)?;

        let watcher = FileWatcher::new(
            &self.file,
            Duration::from_millis(config.watch_resolved.debounce_ms),
        )?;

        output.info(&format!("Watching {}", self.file.display()));
        if let Some(target) = target {
            output.info(&format!("Output: {}", target.display()));
        }
        output.info("Press Ctrl+C to stop");

        while let Some(kind) = watcher.recv() {
            match kind {
                ChangeKind::Created | ChangeKind::Modified => {
                    match render_file(&transformer, &self.file, target) {
                        Ok(()) => output.info(&format!("Re-rendered {}", self.file.display())),
                        Err(e) => output.warning(&format!("Render failed: {e}")),
                    }
                }
                ChangeKind::Removed => output.warning(&format!(
                    "{} was removed; keeping last preview",
                    self.file.display()
                )),
            }
        }

        tracing::info!("File watcher stopped");
        Ok(())
    }
}

/// Read, render and write one full preview of `file`.
fn render_file(
    transformer: &MarkdownTransformer,
    file: &Path,
    target: Option<&Path>,
) -> Result<(), CliError> {
    let source = read_source(Some(file))?;
    let html = transformer.render(&source);
    tracing::debug!(
        path = %file.display(),
        output_bytes = html.len(),
        "Rendered preview"
    );
    write_fragment(target, &html)
}
