use std::sync::{Arc, PoisonError, RwLock};

use pricecut_common::config::{Config, ConfigError};
use tracing::{info, warn};

/// Holds the configuration every evaluation reads.
///
/// Readers get an `Arc` snapshot and never hold the lock while evaluating. A
/// reload validates first and swaps only on success, so readers see either the
/// old or the new configuration, never a mix.
pub struct ConfigStore {
    current: RwLock<Arc<Config>>,
}

impl ConfigStore {
    pub fn new(config: Config) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    pub fn current(&self) -> Arc<Config> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, config: Config) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(config);
    }

    /// Validates `text` and makes it current. On error the previous
    /// configuration stays in place.
    pub fn reload_from_toml(&self, text: &str) -> Result<Arc<Config>, ConfigError> {
        match Config::from_toml_str(text) {
            Ok(config) => {
                let bands = config.bands().len();
                self.replace(config);
                info!(bands, "pricing config reloaded");
                Ok(self.current())
            }
            Err(e) => {
                warn!(error = %e, "pricing config rejected, keeping the previous one");
                Err(e)
            }
        }
    }
}
