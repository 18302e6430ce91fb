//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::crypto::Password;
use crate::errors::Result;
use crate::store::AccountRecord;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print stored accounts with their re-derived passwords, then a count line.
///
/// A row whose password cannot be derived (e.g. a length edited out of
/// range in the database) shows the error instead of a password.
pub fn print_accounts_table(rows: &[(AccountRecord, Result<Password>)]) {
    if rows.is_empty() {
        info("No matching accounts.");
        tip("Run `pwm -d <DOMAIN> -a <ACCOUNT> --save` to store one.");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["ID", "Domain", "Account", "Length", "Mode", "Password"]);

        for (record, password) in rows {
            let password = match password {
                Ok(pw) => pw.to_string(),
                Err(e) => format!("<{e}>"),
            };
            table.add_row(vec![
                record.id.to_string(),
                record.domain.clone(),
                record.account.clone(),
                record.length.to_string(),
                record.mode.to_string(),
                password,
            ]);
        }

        println!("{table}");
    }

    println!("A total of {} records", rows.len());
}
