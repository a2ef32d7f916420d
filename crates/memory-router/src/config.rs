// File: src/config.rs
// Purpose: Router configuration parsing from memory-router.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub router: RouterConfig,
}

/// Router configuration, the `[router]` table
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RouterConfig {
    /// Defer `push` / `replace` commits by one scheduling tick (default: false)
    #[serde(default)]
    pub async_mode: bool,

    /// Keep a back/forward history stack (default: false)
    #[serde(default)]
    pub history: bool,

    /// URL applied with `set_current_url` after construction
    #[serde(default)]
    pub initial_url: Option<String>,

    /// Page templates registered with `use_routes`
    #[serde(default)]
    pub routes: Vec<String>,

    #[serde(default)]
    pub locales: Vec<String>,

    #[serde(default)]
    pub default_locale: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./memory-router.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("memory-router.toml")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid router configuration")
    }
}
