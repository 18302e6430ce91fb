//! `pwm -s <KEYWORD>` — list saved accounts with their re-derived passwords.

use crate::cli::output;
use crate::cli::{db_path, master_key, Cli};
use crate::config::Settings;
use crate::crypto::{checked_length, derive};
use crate::errors::Result;
use crate::store::AccountStore;

/// Execute the search action.
pub fn execute(cli: &Cli, settings: &Settings, keyword: &str) -> Result<()> {
    let store = AccountStore::new(db_path(cli, settings)?);
    let records = store.search(keyword.trim())?;

    let key = master_key(cli)?;
    let rows: Vec<_> = records
        .into_iter()
        .map(|record| {
            let password = checked_length(record.length)
                .and_then(|len| derive(key.as_bytes(), &record.identifier(), len, record.mode));
            if password.is_err() {
                tracing::warn!(
                    id = record.id,
                    length = record.length,
                    "stored length is invalid"
                );
            }
            (record, password)
        })
        .collect();

    output::print_accounts_table(&rows);
    Ok(())
}
