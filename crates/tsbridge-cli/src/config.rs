//! Project configuration (`tsbridge.toml`).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = "tsbridge.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub check: CheckConfig,
    pub resolve: ResolveConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Exclude patterns, relative to the project root
    pub exclude: Vec<String>,
    /// Also check declaration files
    pub strict: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveConfig {
    /// Extensions tried when resolving a specifier; empty means the defaults
    pub extensions: Vec<String>,
}

impl Config {
    /// Load the configuration for a project.
    ///
    /// An explicit path must exist. Without one, `tsbridge.toml` in
    /// `project_root` is used if present, and defaults otherwise.
    pub fn load(explicit: Option<&Path>, project_root: &Path) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = project_root.join(CONFIG_FILE);
                if !candidate.is_file() {
                    log::debug!("no {} in {}", CONFIG_FILE, project_root.display());
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let config = Self::from_str(&text)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        log::info!("using configuration {}", path.display());
        Ok(config)
    }

    pub fn from_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
