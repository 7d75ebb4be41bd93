//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod sample;
pub(crate) mod watch;

pub(crate) use render::RenderArgs;
pub(crate) use sample::SampleArgs;
pub(crate) use watch::WatchArgs;

use std::io::{Read, Write};
use std::path::Path;

use mdpreview_config::{CliSettings, Config, RenderConfig};
use mdpreview_renderer::{MarkdownTransformer, RenderOptions};

use crate::error::CliError;

/// Load configuration from `path` or by discovery, then apply CLI overrides.
pub(crate) fn load_config(
    path: Option<&Path>,
    cli_settings: &CliSettings,
) -> Result<Config, CliError> {
    let config = Config::load(path, Some(cli_settings))?;
    match &config.config_path {
        Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
        None => tracing::info!("No mdpreview.toml found, using defaults"),
    }
    Ok(config)
}

/// Build a transformer from the `[render]` configuration.
pub(crate) fn transformer(config: &RenderConfig) -> MarkdownTransformer {
    MarkdownTransformer::with_options(RenderOptions {
        escape_inline_code: config.escape_inline_code,
        escape_links: config.escape_links,
    })
}

/// Read markdown from `path`, or from stdin when `path` is `None` or `-`.
pub(crate) fn read_source(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Write a rendered fragment to `path`, or to stdout when `path` is `None`.
pub(crate) fn write_fragment(path: Option<&Path>, html: &str) -> Result<(), CliError> {
    if let Some(path) = path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, html).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })
    } else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{html}")?;
        stdout.flush()?;
        Ok(())
    }
}
