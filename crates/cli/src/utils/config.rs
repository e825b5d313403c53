//! Project config file and setting resolution

use crate::error::{CliError, CliResult};
use crate::utils::target::parse_target;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use typegen_engine::{OutputTarget, DEFAULT_ROOT_NAME};

pub const CONFIG_PATH: &str = ".typegen/config.yaml";

/// `.typegen/config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Default output target id
    pub target: Option<String>,
    /// Default root type name for the schema-inference targets
    #[serde(alias = "rootName")]
    pub root_name: Option<String>,
    /// Derive list for Rust output
    #[serde(alias = "rustDerives")]
    pub rust_derives: Option<String>,
}

/// Read the project config file, if there is one.
pub fn read_config() -> CliResult<Option<ConfigFile>> {
    read_config_from(Path::new(CONFIG_PATH))
}

pub fn read_config_from(config_path: &Path) -> CliResult<Option<ConfigFile>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(config_path)
        .map_err(|e| CliError::Message(format!("Failed to read config file: {e}")))?;
    // an empty file deserializes as null
    if content.trim().is_empty() {
        return Ok(Some(ConfigFile::default()));
    }

    let config = serde_yaml::from_str(&content)
        .map_err(|e| CliError::Message(format!("Failed to parse config file: {e}")))?;
    Ok(Some(config))
}

/// Settings for one run after applying flags over config over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub target: OutputTarget,
    pub root_name: String,
    pub rust_derives: Option<String>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides<'a> {
    pub target: Option<&'a str>,
    pub root_name: Option<&'a str>,
    pub rust_derives: Option<&'a str>,
}

/// Priority: CLI flag > config file > default
pub fn resolve_settings(overrides: Overrides<'_>) -> CliResult<Settings> {
    let config = read_config()?.unwrap_or_default();
    resolve_with(&config, overrides)
}

fn resolve_with(config: &ConfigFile, overrides: Overrides<'_>) -> CliResult<Settings> {
    let target = match overrides.target.or(config.target.as_deref()) {
        Some(id) => parse_target(id)?,
        None => OutputTarget::default(),
    };
    let root_name = overrides
        .root_name
        .or(config.root_name.as_deref())
        .unwrap_or(DEFAULT_ROOT_NAME)
        .to_string();
    let rust_derives = overrides
        .rust_derives
        .or(config.rust_derives.as_deref())
        .map(str::to_string);

    Ok(Settings {
        target,
        root_name,
        rust_derives,
    })
}
