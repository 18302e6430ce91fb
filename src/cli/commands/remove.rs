//! `pwm -r <ID>` — remove a saved account.

use crate::cli::output;
use crate::cli::{db_path, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::store::AccountStore;

/// Execute the remove action. An unknown id is not an error.
pub fn execute(cli: &Cli, settings: &Settings, id: i64) -> Result<()> {
    let store = AccountStore::new(db_path(cli, settings)?);

    if store.delete(id)? == 0 {
        output::info(&format!("No record with id {id}, nothing removed"));
    } else {
        output::success(&format!("Removed record {id}"));
    }

    Ok(())
}
