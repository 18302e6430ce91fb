use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in pwm.
#[derive(Debug, Error)]
pub enum PwmError {
    // --- Configuration errors ---
    #[error("No storage location — pass --db or set PWM_DB_PATH")]
    MissingStoragePath,

    #[error("Invalid password length {length} (must be between {min} and {max})")]
    InvalidLength { length: i64, min: usize, max: usize },

    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Store errors ---
    #[error("Cannot open account store at {path}: {reason}")]
    StoreUnavailable { path: PathBuf, reason: String },

    #[error("Account store error: {0}")]
    StoreError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for pwm results.
pub type Result<T> = std::result::Result<T, PwmError>;
