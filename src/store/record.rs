//! Account records kept in the store.
//!
//! A record holds only what is needed to regenerate a password. The
//! password itself is never part of it.

use crate::crypto::identifier;

/// A stored (domain, account, length, mode) tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: i64,
    pub domain: String,
    pub account: String,
    /// As stored; rows written by older tools may hold any integer.
    pub length: i64,
    pub mode: i64,
}

impl AccountRecord {
    /// The HMAC message for this account (`account@domain`).
    pub fn identifier(&self) -> String {
        identifier(&self.domain, &self.account)
    }
}

/// Parameters for a record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub domain: String,
    pub account: String,
    pub length: usize,
    pub mode: i64,
}

impl NewAccount {
    pub fn new(
        domain: impl Into<String>,
        account: impl Into<String>,
        length: usize,
        mode: i64,
    ) -> Self {
        Self {
            domain: domain.into(),
            account: account.into(),
            length,
            mode,
        }
    }
}
