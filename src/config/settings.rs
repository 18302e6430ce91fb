use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::DEFAULT_LENGTH;
use crate::errors::{PwmError, Result};

/// Environment variable holding the default database path.
pub const DB_PATH_ENV: &str = "PWM_DB_PATH";

/// Database file name used when nothing else points somewhere.
pub const DEFAULT_DB_FILE: &str = "pwm.db";

/// Per-directory configuration, loaded from `.pwm.toml`.
///
/// Every field has a default so pwm works without any config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Database path used when neither `--db` nor `PWM_DB_PATH` is given.
    #[serde(default)]
    pub db_path: Option<String>,

    /// Password length when `--length` is omitted (default: 15).
    #[serde(default = "default_length")]
    pub default_length: i64,

    /// Policy mode when `--mode` is omitted (default: 0).
    #[serde(default)]
    pub default_mode: i64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_length() -> i64 {
    DEFAULT_LENGTH as i64
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: None,
            default_length: default_length(),
            default_mode: 0,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".pwm.toml";

    /// Load settings from `<dir>/.pwm.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PwmError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Pick the database file.
    ///
    /// Order: `--db` flag, then `PWM_DB_PATH`, then `db_path` from the
    /// config file, then `pwm.db` in the working directory. Empty values
    /// count as unset. Fails with `MissingStoragePath` when none applies.
    pub fn resolve_db_path(
        &self,
        flag: Option<&str>,
        env: Option<&str>,
        cwd: Option<&Path>,
    ) -> Result<PathBuf> {
        let explicit = [flag, env, self.db_path.as_deref()]
            .into_iter()
            .flatten()
            .find(|p| !p.trim().is_empty());

        match (explicit, cwd) {
            (Some(path), _) => Ok(PathBuf::from(path)),
            (None, Some(dir)) => Ok(dir.join(DEFAULT_DB_FILE)),
            (None, None) => Err(PwmError::MissingStoragePath),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
