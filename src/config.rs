use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use marketplace_core::models::DEFAULT_PLACEHOLDER_IMAGE;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub sources: SourcesConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the marketplace exports live.
///
/// Explicit `files` load first, in order; files discovered under `dir`
/// follow, sorted by relative path.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourcesConfig {
    #[serde(default)]
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.json".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

fn default_page_size() -> usize {
    5
}
fn default_placeholder_image() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Any `EnvFilter` directive, e.g. `info` or `marketplace_checker=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Full,
}

impl Config {
    /// Built-in defaults with no sources. Used when sources come from the
    /// command line and no config file exists.
    pub fn minimal() -> Self {
        Self {
            sources: SourcesConfig {
                include_globs: default_include_globs(),
                ..SourcesConfig::default()
            },
            display: DisplayConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;

    Ok(config)
}

/// Load the config file, letting `--source` flags replace its sources.
///
/// With override sources and no config file on disk, [`Config::minimal`]
/// supplies everything else.
pub fn resolve_config(path: &Path, source_overrides: &[PathBuf]) -> Result<Config> {
    if source_overrides.is_empty() {
        return load_config(path);
    }

    let mut config = if path.exists() {
        load_config(path)?
    } else {
        Config::minimal()
    };
    config.sources.files = source_overrides.to_vec();
    config.sources.dir = None;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.sources.files.is_empty() && config.sources.dir.is_none() {
        anyhow::bail!("sources: set `files`, `dir`, or both");
    }

    if config.sources.dir.is_some() && config.sources.include_globs.is_empty() {
        anyhow::bail!("sources.include_globs must not be empty when sources.dir is set");
    }

    if config.display.page_size == 0 {
        anyhow::bail!("display.page_size must be > 0");
    }

    if config.display.placeholder_image.trim().is_empty() {
        anyhow::bail!("display.placeholder_image must not be empty");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}
