//! Settings file management.
//!
//! Handles reading and validating the optional `config.toml` inside the
//! data directory. Settings seed the quota limits of a fresh state and
//! control cost-warning behavior; an existing quota state keeps its own
//! stored limits.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::quota::{QuotaGuard, QuotaLimits};
use crate::core::store;
use crate::error::{ConfigError, Result};

/// Operator settings stored in `config.toml`.
///
/// Every field is optional in the file; omitted sections fall back to
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial quota limits and cost-warning configuration.
    pub quota: QuotaLimits,
}

impl Settings {
    /// Load settings from `dir/config.toml`, falling back to defaults when
    /// the file is absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the file exists but is malformed.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(constants::SETTINGS_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let settings: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Load settings from the standard data directory.
    pub fn load_default() -> Result<Self> {
        Self::load(&store::data_dir())
    }

    /// A quota guard over `dir` seeded with these settings.
    pub fn quota_guard(&self, dir: impl Into<std::path::PathBuf>) -> QuotaGuard {
        QuotaGuard::with_initial_limits(dir, self.quota.clone())
    }
}
