use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use tempfile::NamedTempFile;

use super::Configuration;
use crate::error::Result;

/// Where the configuration lives when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "mappings/mappings.json";

/// Path-backed persistence for a [`Configuration`]
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration. A missing file is an empty configuration;
    /// a malformed one is an error.
    pub fn load(&self) -> Result<Configuration> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let config = Configuration::from_json_str(&contents)?;
                debug!("Loaded {} binding(s) from {}", config.len(), self.path.display());
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No configuration at {}, starting empty", self.path.display());
                Ok(Configuration::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load the configuration, falling back to an empty one on any error
    pub fn load_or_default(&self) -> Configuration {
        self.load().unwrap_or_else(|e| {
            error!("Failed to load {}: {}; using an empty configuration", self.path.display(), e);
            Configuration::default()
        })
    }

    /// Write the configuration atomically: the new contents go to a temporary
    /// file next to the target, which then replaces it in a single rename.
    pub fn save(&self, config: &Configuration) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&config.to_json_vec()?)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        debug!("Saved {} binding(s) to {}", config.len(), self.path.display());
        Ok(())
    }
}
