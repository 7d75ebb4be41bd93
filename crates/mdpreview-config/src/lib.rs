//! Configuration management for mdpreview.
//!
//! Parses `mdpreview.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `watch.output` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override inline code escaping.
    pub escape_inline_code: Option<bool>,
    /// Override link escaping.
    pub escape_links: Option<bool>,
    /// Override watch debounce interval in milliseconds.
    pub debounce_ms: Option<u64>,
    /// Override output file.
    pub output: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdpreview.toml";

/// Upper bound for `watch.debounce_ms`.
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render configuration.
    pub render: RenderConfig,
    /// Watch configuration (output path as a string from TOML).
    watch: WatchConfigRaw,

    /// Resolved watch configuration (set after loading).
    #[serde(skip)]
    pub watch_resolved: WatchConfig,
    /// Path to the loaded config file, `None` when defaults are used.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Render configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Escape the content of inline code spans.
    pub escape_inline_code: bool,
    /// Escape link text and URL.
    pub escape_links: bool,
}

/// Raw watch configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WatchConfigRaw {
    debounce_ms: Option<u64>,
    output: Option<String>,
}

/// Resolved watch configuration.
#[derive(Debug, PartialEq, Eq)]
pub struct WatchConfig {
    /// Quiet period after the last change before re-rendering.
    pub debounce_ms: u64,
    /// File receiving the rendered fragment (stdout when `None`).
    pub output: Option<PathBuf>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            output: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`watch.output`").
        field: String,
        /// Error message (e.g., "${`PREVIEW_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdpreview.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values. The result is validated again
    /// once overrides are in place.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(escape_inline_code) = settings.escape_inline_code {
            self.render.escape_inline_code = escape_inline_code;
        }
        if let Some(escape_links) = settings.escape_links {
            self.render.escape_links = escape_links;
        }
        if let Some(debounce_ms) = settings.debounce_ms {
            self.watch_resolved.debounce_ms = debounce_ms;
        }
        if let Some(output) = &settings.output {
            self.watch_resolved.output = Some(output.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let debounce_ms = self.watch_resolved.debounce_ms;
        if debounce_ms == 0 {
            return Err(ConfigError::Validation(
                "watch.debounce_ms must be greater than 0".to_owned(),
            ));
        }
        if debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::Validation(format!(
                "watch.debounce_ms cannot exceed {MAX_DEBOUNCE_MS}"
            )));
        }

        if let Some(output) = &self.watch_resolved.output
            && output.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "watch.output cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref output) = self.watch.output {
            self.watch.output = Some(expand::expand_env(output, "watch.output")?);
        }
        Ok(())
    }

    /// Resolve raw values, making relative paths absolute against `config_dir`.
    fn resolve(&mut self, config_dir: &Path) {
        let defaults = WatchConfig::default();
        self.watch_resolved = WatchConfig {
            debounce_ms: self.watch.debounce_ms.unwrap_or(defaults.debounce_ms),
            output: self.watch.output.as_deref().map(|output| {
                if output.is_empty() {
                    PathBuf::new()
                } else {
                    config_dir.join(output)
                }
            }),
        };
    }
}
