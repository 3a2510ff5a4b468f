//! # Runtime Configuration
//!
//! Defaults, overridden from `GX_*` environment variables, then from CLI
//! flags in `main`.

use gx_01_assignment_engine::EngineConfig;
use gx_02_state_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

pub const ENV_ROSTER: &str = "GX_ROSTER";
pub const ENV_DATA_DIR: &str = "GX_DATA_DIR";
pub const ENV_CACHE_DIR: &str = "GX_CACHE_DIR";
pub const ENV_SEED: &str = "GX_SEED";
pub const ENV_MAX_ATTEMPTS: &str = "GX_MAX_ATTEMPTS";

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Roster JSON file.
    pub roster_path: PathBuf,
    /// Directory holding the exchange record.
    pub data_dir: PathBuf,
    /// Local cache directory; `None` disables the fallback.
    pub cache_dir: Option<PathBuf>,
    /// Fixed RNG seed for reproducible draws.
    pub seed: Option<u64>,
    pub engine: EngineConfig,
    pub store: StoreConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from("roster.json"),
            data_dir: PathBuf::from("data"),
            cache_dir: None,
            seed: None,
            engine: EngineConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl RuntimeConfig {
    /// Defaults with process environment overrides.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; unparsable values are logged and ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_ROSTER) {
            self.roster_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_CACHE_DIR) {
            self.cache_dir = Some(PathBuf::from(dir));
        }
        if let Some(seed) = lookup(ENV_SEED) {
            match seed.parse() {
                Ok(seed) => {
                    self.seed = Some(seed);
                    info!("Using fixed RNG seed from environment");
                }
                Err(_) => warn!("{ENV_SEED} must be an unsigned integer"),
            }
        }
        if let Some(attempts) = lookup(ENV_MAX_ATTEMPTS) {
            match attempts.parse() {
                Ok(attempts) => self.engine.max_attempts = attempts,
                Err(_) => warn!("{ENV_MAX_ATTEMPTS} must be an unsigned integer"),
            }
        }
        self
    }
}
