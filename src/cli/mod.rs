//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{Settings, DB_PATH_ENV};
use crate::crypto::MasterKey;
use crate::errors::{PwmError, Result};

/// Environment variable read for the master key when `--key` is not given.
pub const KEY_ENV: &str = "PWM_KEY";

/// pwm CLI: deterministic password generator.
#[derive(Parser, Debug)]
#[command(
    name = "pwm",
    about = "Deterministic password generator",
    version
)]
pub struct Cli {
    /// Prompt for your master key
    #[arg(short = 'k', long = "key")]
    pub prompt_key: bool,

    /// The domain of the account (e.g. github.com)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// The account used to log in
    #[arg(short, long)]
    pub account: Option<String>,

    /// Password length, 3 to 28 (default: 15)
    #[arg(short, long, allow_negative_numbers = true)]
    pub length: Option<i64>,

    /// Password policy mode (default: 0)
    #[arg(short, long, allow_negative_numbers = true)]
    pub mode: Option<i64>,

    /// List saved accounts whose domain or account contains KEYWORD ('*' for all)
    #[arg(short, long, value_name = "KEYWORD")]
    pub search: Option<String>,

    /// Save the domain and account so the password can be listed later
    #[arg(short = 'w', long)]
    pub save: bool,

    /// Remove a saved account by id
    #[arg(short, long, value_name = "ID")]
    pub remove: Option<i64>,

    /// Path to the account database (default: $PWM_DB_PATH or ./pwm.db)
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master key, trying in order:
/// 1. Interactive prompt, if `--key` was passed
/// 2. `PWM_KEY` env var (scripts/CI)
/// 3. The empty key
pub fn master_key(cli: &Cli) -> Result<MasterKey> {
    if cli.prompt_key {
        let key = dialoguer::Password::new()
            .with_prompt("Your key")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| PwmError::CommandFailed(format!("key prompt: {e}")))?;
        return Ok(MasterKey::from(Zeroizing::new(key)));
    }

    if let Ok(key) = std::env::var(KEY_ENV) {
        if !key.is_empty() {
            return Ok(MasterKey::from(Zeroizing::new(key)));
        }
    }

    output::warning("No master key given (use -k or PWM_KEY); using the empty key.");
    Ok(MasterKey::empty())
}

/// Resolve the account database path from `--db`, `PWM_DB_PATH`, the
/// config file and the working directory.
pub fn db_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let env = std::env::var(DB_PATH_ENV).ok();
    let cwd = std::env::current_dir().ok();
    settings.resolve_db_path(cli.db.as_deref(), env.as_deref(), cwd.as_deref())
}
