//! Config file loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use pubshelf_core::loader::{CONNECT_TIMEOUT_SECS, DEFAULT_SOURCE};
use pubshelf_core::render::DEFAULT_EXCERPT_CHARS;
use serde::Deserialize;

/// TOML-backed file configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Publication list URL or path.
    pub source: Option<String>,
    /// Confine keyboard focus to the open modal.
    pub trap_focus: Option<bool>,
    /// Abstract excerpt length on cards.
    pub excerpt_chars: Option<usize>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(chars) = self.excerpt_chars
            && !(1..=2000).contains(&chars)
        {
            bail!("Invalid config value for `excerpt_chars`: {chars}. Expected range: 1..=2000");
        }
        if let Some(secs) = self.connect_timeout_secs
            && !(1..=3600).contains(&secs)
        {
            bail!(
                "Invalid config value for `connect_timeout_secs`: {secs}. Expected range: 1..=3600"
            );
        }
        if let Some(source) = &self.source
            && source.trim().is_empty()
        {
            bail!("Invalid config value for `source`: must not be empty");
        }
        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Log filter directive for this setting.
    #[must_use]
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose | Self::Debug => "debug",
            Self::Quiet => "error",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Path that was consulted, if any.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/pubshelf/config.toml`
/// 2. `$HOME/.config/pubshelf/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("pubshelf")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("pubshelf")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from `explicit` when given (must exist), otherwise from the
/// default path if present.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
        });
    }

    let path = resolve_default_config_path();
    match path.as_deref() {
        Some(path_ref) if path_ref.exists() => {
            let config = load_file_config(path_ref)?;
            Ok(LoadedConfig {
                path,
                config: Some(config),
            })
        }
        _ => Ok(LoadedConfig { path, config: None }),
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let config: FileConfig = toml::from_str(raw)?;
    config.validate()?;
    Ok(config)
}

/// Values given on the command line, which win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub source: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub no_focus_trap: bool,
    pub excerpt_chars: Option<usize>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source: String,
    pub connect_timeout_secs: u64,
    pub trap_focus: bool,
    pub excerpt_chars: usize,
}

/// Merges CLI values, file values, and built-in defaults, in that order.
#[must_use]
pub fn resolve_settings(cli: &CliOverrides, file: Option<&FileConfig>) -> Settings {
    let file = file.cloned().unwrap_or_default();
    Settings {
        source: cli
            .source
            .clone()
            .or(file.source)
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        connect_timeout_secs: cli
            .connect_timeout_secs
            .or(file.connect_timeout_secs)
            .unwrap_or(CONNECT_TIMEOUT_SECS),
        trap_focus: !cli.no_focus_trap && file.trap_focus.unwrap_or(true),
        excerpt_chars: cli
            .excerpt_chars
            .or(file.excerpt_chars)
            .unwrap_or(DEFAULT_EXCERPT_CHARS),
    }
}
