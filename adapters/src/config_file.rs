use std::path::{Path, PathBuf};

use pricecut_common::config::{Config, ConfigError};
use tracing::debug;

/// The pricing document on disk.
#[derive(Clone, Debug)]
pub struct TomlConfigFile {
    path: PathBuf,
}

impl TomlConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<String, ConfigError> {
        std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Reads, parses and validates the document.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let text = self.read()?;
        debug!(path = %self.path.display(), bytes = text.len(), "pricing config read");
        Config::from_toml_str(&text)
    }
}
