//! Configuration: the optional `.pwm.toml` file and storage path resolution.

pub mod settings;

pub use settings::{Settings, DB_PATH_ENV, DEFAULT_DB_FILE};
