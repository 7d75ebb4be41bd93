//! mdpreview CLI - Markdown live preview.
//!
//! Provides commands for:
//! - `render`: Render a markdown file (or stdin) to an HTML fragment
//! - `watch`: Re-render a markdown file on every change
//! - `sample`: Print the built-in sample document

mod commands;
mod error;
mod output;
mod watcher;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, SampleArgs, WatchArgs};
use output::Output;

/// mdpreview - Markdown to HTML fragment previewer.
#[derive(Parser)]
#[command(name = "mdpreview", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render markdown to an HTML fragment.
    Render(RenderArgs),
    /// Watch a markdown file and re-render it on every change.
    Watch(WatchArgs),
    /// Print the built-in sample document.
    Sample(SampleArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.verbose,
            Self::Watch(args) => args.verbose,
            Self::Sample(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Watch(args) => args.execute(),
        Commands::Sample(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_from_stdin() {
        let cli = Cli::try_parse_from(["mdpreview", "render"]).unwrap();
        assert!(matches!(cli.command, Commands::Render(_)));
        assert!(!cli.command.verbose());
    }

    #[test]
    fn test_parse_watch_verbose() {
        let cli = Cli::try_parse_from([
            "mdpreview",
            "watch",
            "notes.md",
            "--debounce-ms",
            "250",
            "-v",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Watch(_)));
        assert!(cli.command.verbose());
    }

    #[test]
    fn test_watch_requires_file() {
        assert!(Cli::try_parse_from(["mdpreview", "watch"]).is_err());
    }
}
