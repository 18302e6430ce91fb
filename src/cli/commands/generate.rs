//! `pwm -d <DOMAIN> -a <ACCOUNT>` — derive a password, optionally saving the account.

use crate::cli::output;
use crate::cli::{db_path, master_key, Cli};
use crate::config::Settings;
use crate::crypto::{checked_length, PasswordGenerator};
use crate::errors::Result;
use crate::store::{AccountStore, NewAccount};

/// Execute the generate action.
///
/// The password is derived and printed before the store is touched, so a
/// storage problem never hides it.
pub fn execute(cli: &Cli, settings: &Settings, domain: &str, account: &str) -> Result<()> {
    let length = checked_length(cli.length.unwrap_or(settings.default_length))?;
    let mode = cli.mode.unwrap_or(settings.default_mode);

    let generator = PasswordGenerator::new(master_key(cli)?);
    let password = generator.generate(domain, account, length, mode)?;
    println!("{password}");

    if cli.save {
        let store = AccountStore::new(db_path(cli, settings)?);
        let id = store.insert(&NewAccount::new(domain, account, length, mode))?;
        output::success(&format!("Saved {account}@{domain} as record {id}"));
    }

    Ok(())
}
