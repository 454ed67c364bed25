use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::nmcli::Nmcli;

/// Optional user settings. Credentials are never stored here; they stay in
/// the host's credential store.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Interface used when none is given on the command line.
    #[serde(default)]
    pub default_interface: Option<String>,

    /// Tera template replacing the built-in network listing.
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Path of the nmcli executable.
    #[serde(default)]
    pub nmcli: Option<PathBuf>,
}

impl Config {
    /// Load the config at `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// The NetworkManager backend this configuration points at.
    pub fn backend(&self) -> Nmcli {
        match &self.nmcli {
            Some(program) => Nmcli::new(program),
            None => Nmcli::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("aeroport").join("config.toml"))
}
