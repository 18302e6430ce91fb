//! Account store — SQLite-backed table of account parameters.
//!
//! Holds `(domain, account, length, mode)` tuples in a single `pwm`
//! table so passwords can be regenerated later. Neither the master key
//! nor any derived password ever reaches this module.
//!
//! There is no cache: every operation opens the database, runs inside
//! its own transaction and closes the connection again. A failed
//! operation rolls back and leaves the file unchanged.

pub mod record;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, Transaction};

use crate::errors::{PwmError, Result};

pub use record::{AccountRecord, NewAccount};

/// Keyword that lists every record, same as an empty keyword.
pub const WILDCARD: &str = "*";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS pwm (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    domain  TEXT NOT NULL,
    account TEXT NOT NULL,
    length  INTEGER NOT NULL,
    mode    INTEGER NOT NULL
);";

/// Data access object for stored account records.
#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    /// Point the store at a database file. Nothing is opened until the
    /// first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `pwm` table if it does not exist yet. Idempotent.
    pub fn ensure_schema(&self) -> Result<()> {
        self.with_transaction("ensure schema", |_| Ok(()))
    }

    /// Append a record and return its freshly assigned id.
    ///
    /// Duplicates are allowed; nothing is merged or overwritten.
    pub fn insert(&self, account: &NewAccount) -> Result<i64> {
        let length = i64::try_from(account.length).map_err(|_| {
            PwmError::StoreError(format!("length {} does not fit the store", account.length))
        })?;

        let id = self.with_transaction("insert", |tx| {
            tx.execute(
                "INSERT INTO pwm (domain, account, length, mode) VALUES (?1, ?2, ?3, ?4)",
                params![account.domain, account.account, length, account.mode],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        tracing::debug!(id, domain = %account.domain, "account record inserted");
        Ok(id)
    }

    /// Records whose domain or account contains `keyword`, by ascending id.
    ///
    /// Matching is a case-sensitive substring test. An empty keyword or
    /// [`WILDCARD`] returns every record.
    pub fn search(&self, keyword: &str) -> Result<Vec<AccountRecord>> {
        let keyword = if keyword == WILDCARD { "" } else { keyword };

        let records = self.with_transaction("search", |tx| {
            let mut stmt = tx.prepare(
                "SELECT id, domain, account, length, mode
                 FROM pwm
                 WHERE ?1 = '' OR instr(domain, ?1) > 0 OR instr(account, ?1) > 0
                 ORDER BY id ASC",
            )?;

            let rows = stmt.query_map(params![keyword], |row| {
                Ok(AccountRecord {
                    id: row.get(0)?,
                    domain: row.get(1)?,
                    account: row.get(2)?,
                    length: row.get(3)?,
                    mode: row.get(4)?,
                })
            })?;

            rows.collect::<rusqlite::Result<Vec<_>>>()
        })?;

        tracing::debug!(count = records.len(), "account records loaded");
        Ok(records)
    }

    /// Every record, by ascending id.
    pub fn list(&self) -> Result<Vec<AccountRecord>> {
        self.search("")
    }

    /// Remove the record with `id`, returning the number of rows removed.
    ///
    /// An unknown id removes nothing and is not an error.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let removed = self.with_transaction("delete", |tx| {
            tx.execute("DELETE FROM pwm WHERE id = ?1", params![id])
        })?;

        if removed == 0 {
            tracing::debug!(id, "no account record to delete");
        } else {
            tracing::debug!(id, "account record deleted");
        }
        Ok(removed)
    }

    /// Open the database file, restricting its permissions to the owner.
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(|e| PwmError::StoreUnavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&self.path, perms);
        }

        Ok(conn)
    }

    /// Run `op` inside a fresh transaction on a fresh connection.
    ///
    /// The schema is ensured first. The transaction commits only if `op`
    /// succeeds; otherwise dropping it rolls back. The connection is
    /// closed on every path when it goes out of scope.
    fn with_transaction<T, F>(&self, what: &str, op: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
    {
        let mut conn = self.connect()?;
        let store_err = |e: rusqlite::Error| PwmError::StoreError(format!("{what}: {e}"));

        let tx = conn.transaction().map_err(store_err)?;
        tx.execute_batch(CREATE_TABLE).map_err(store_err)?;

        let value = match op(&tx) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(operation = what, error = %e, "store operation rolled back");
                return Err(store_err(e));
            }
        };

        tx.commit().map_err(store_err)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> AccountStore {
        AccountStore::new(dir.path().join("pwm.db"))
    }

    #[test]
    fn ensure_schema_creates_database() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.ensure_schema().unwrap();
        assert!(dir.path().join("pwm.db").exists());

        // Second call is a no-op.
        store.ensure_schema().unwrap();
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let a = store.insert(&NewAccount::new("github.com", "alice", 15, 0)).unwrap();
        let b = store.insert(&NewAccount::new("github.com", "alice", 15, 0)).unwrap();
        assert!(b > a, "duplicates get their own id");
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn search_matches_domain_or_account() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.insert(&NewAccount::new("github.com", "alice", 15, 0)).unwrap();
        store.insert(&NewAccount::new("gitlab.com", "bob", 20, 0)).unwrap();
        store.insert(&NewAccount::new("example.org", "carol", 12, 1)).unwrap();

        let git = store.search("git").unwrap();
        assert_eq!(git.len(), 2);
        assert_eq!(git[0].domain, "github.com");
        assert_eq!(git[1].domain, "gitlab.com");

        let bob = store.search("bo").unwrap();
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0].account, "bob");
        assert_eq!(bob[0].length, 20);
    }

    #[test]
    fn search_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.insert(&NewAccount::new("GitHub.com", "alice", 15, 0)).unwrap();

        assert!(store.search("github").unwrap().is_empty());
        assert_eq!(store.search("GitHub").unwrap().len(), 1);
    }

    #[test]
    fn empty_and_wildcard_list_everything() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.insert(&NewAccount::new("a.com", "x", 15, 0)).unwrap();
        store.insert(&NewAccount::new("b.com", "y", 15, 0)).unwrap();

        assert_eq!(store.search("").unwrap().len(), 2);
        assert_eq!(store.search(WILDCARD).unwrap().len(), 2);
    }

    #[test]
    fn keyword_is_not_interpreted_as_sql() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.insert(&NewAccount::new("a.com", "x", 15, 0)).unwrap();

        assert!(store.search("%").unwrap().is_empty());
        assert!(store.search("' OR 1=1 --").unwrap().is_empty());
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn failed_operation_rolls_back() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let result: Result<()> = store.with_transaction("test", |tx| {
            tx.execute(
                "INSERT INTO pwm (domain, account, length, mode) VALUES ('a.com', 'x', 15, 0)",
                [],
            )?;
            tx.execute("INSERT INTO no_such_table VALUES (1)", [])?;
            Ok(())
        });

        assert!(matches!(result, Err(PwmError::StoreError(_))));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn lists_rows_with_negative_length_or_mode() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.insert(&NewAccount::new("a.com", "x", 15, 0)).unwrap();

        // Older databases hold whatever integers were typed, as quoted text.
        let conn = Connection::open(store.path()).unwrap();
        conn.execute(
            "INSERT INTO pwm (domain, account, length, mode) VALUES ('b.com', 'y', '15', '-1')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO pwm (domain, account, length, mode) VALUES ('c.com', 'z', '-5', '0')",
            [],
        )
        .unwrap();
        drop(conn);

        let all = store.search(WILDCARD).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].mode, -1);
        assert_eq!(all[1].length, 15);
        assert_eq!(all[2].length, -5);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.delete(42).unwrap(), 0);
    }

    #[test]
    fn open_fails_on_bad_path() {
        let store = AccountStore::new("/nonexistent/path/that/does/not/exist/pwm.db");
        let err = store.list().unwrap_err();
        assert!(matches!(err, PwmError::StoreUnavailable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn database_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.ensure_schema().unwrap();

        let perms = std::fs::metadata(store.path()).unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600, "pwm.db should be owner-only");
    }
}
