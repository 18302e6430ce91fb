//! Password derivation: HMAC-SHA1 -> base64 -> truncate -> substitute -> repair.
//!
//! The primitive (HMAC-SHA1), the alphabet (standard padded base64) and
//! the repair rules are all fixed. Any change here silently produces a
//! different password for every stored account.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use zeroize::Zeroizing;

use super::keys::MasterKey;
use super::policy::{self, Policy, MIN_REPAIR_LEN};
use crate::errors::{PwmError, Result};

type HmacSha1 = Hmac<Sha1>;

/// Shortest password we can generate (the repair pass needs three slots).
pub const MIN_LENGTH: usize = MIN_REPAIR_LEN;

/// Longest password we can generate: base64 of a 20-byte digest.
pub const MAX_LENGTH: usize = 28;

/// Length used when none is given.
pub const DEFAULT_LENGTH: usize = 15;

/// A derived password. The buffer is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Build the HMAC message for an account: `account@domain`.
///
/// No escaping is done, so `("b.com", "a@x")` and `("x@b.com", "a")`
/// share an identifier. Escaping would change existing passwords.
pub fn identifier(domain: &str, account: &str) -> String {
    format!("{account}@{domain}")
}

/// Reject lengths the encoder or the repair pass cannot honour.
pub fn validate_length(length: usize) -> Result<()> {
    checked_length(i64::try_from(length).unwrap_or(i64::MAX)).map(|_| ())
}

/// Turn a stored or user-supplied length into a usable one.
///
/// Negative and out-of-range values become `InvalidLength`.
pub fn checked_length(length: i64) -> Result<usize> {
    match usize::try_from(length) {
        Ok(len) if (MIN_LENGTH..=MAX_LENGTH).contains(&len) => Ok(len),
        _ => Err(PwmError::InvalidLength {
            length,
            min: MIN_LENGTH,
            max: MAX_LENGTH,
        }),
    }
}

/// Derive the password for `identifier` under `key`.
///
/// Pure function of its inputs. Fails only for lengths outside
/// `MIN_LENGTH..=MAX_LENGTH`.
pub fn derive(key: &[u8], identifier: &str, length: usize, mode: i64) -> Result<Password> {
    validate_length(length)?;

    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(identifier.as_bytes());
    let digest = Zeroizing::new(mac.finalize().into_bytes().to_vec());

    let mut buf = Zeroizing::new(STANDARD.encode(digest.as_slice()).into_bytes());
    buf.truncate(length);

    policy::substitute_symbols(&mut buf);
    Policy::from_mode(mode).apply(&mut buf);

    // base64 output and the repair alphabets are ASCII.
    let text = String::from_utf8(buf.to_vec())
        .map_err(|e| PwmError::CommandFailed(format!("non-ASCII password output: {e}")))?;
    Ok(Password(Zeroizing::new(text)))
}

/// Derives passwords for accounts under one master key.
///
/// The key is an explicit value held here rather than process-wide state.
#[derive(Debug)]
pub struct PasswordGenerator {
    key: MasterKey,
}

impl PasswordGenerator {
    pub fn new(key: MasterKey) -> Self {
        Self { key }
    }

    /// Derive the password for `account` at `domain`.
    pub fn generate(
        &self,
        domain: &str,
        account: &str,
        length: usize,
        mode: i64,
    ) -> Result<Password> {
        derive(self.key.as_bytes(), &identifier(domain, account), length, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_account_at_domain() {
        assert_eq!(identifier("example.com", "alice"), "alice@example.com");
    }

    #[test]
    fn identifier_collision_is_not_escaped() {
        assert_eq!(identifier("b.com", "a@x"), identifier("x@b.com", "a"));
    }

    #[test]
    fn pinned_fixture() {
        let pw = derive(b"k", "alice@example.com", 15, 0).unwrap();
        assert_eq!(pw.as_str(), "QdwcVtHjAgYkT7V");
    }

    #[test]
    fn full_length_keeps_padding() {
        let pw = derive(b"k", "alice@example.com", MAX_LENGTH, 0).unwrap();
        assert_eq!(pw.as_str(), "QdwcVtHjAgYkT7V1D0yT4mVAWLg=");
    }

    #[test]
    fn rejects_out_of_range_lengths() {
        for len in [0, 1, 2, 29, 100] {
            let err = derive(b"k", "alice@example.com", len, 0).unwrap_err();
            assert!(
                matches!(err, PwmError::InvalidLength { length, .. } if length == len as i64),
                "length {len} should be rejected"
            );
        }
    }

    #[test]
    fn checked_length_accepts_range_and_rejects_the_rest() {
        assert_eq!(checked_length(3).unwrap(), 3);
        assert_eq!(checked_length(28).unwrap(), 28);
        for len in [-5, -1, 0, 2, 29, i64::MAX] {
            let err = checked_length(len).unwrap_err();
            assert!(matches!(err, PwmError::InvalidLength { length, .. } if length == len));
        }
        let err = checked_length(-5).unwrap_err();
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn generator_matches_free_function() {
        let generator = PasswordGenerator::new(MasterKey::from_passphrase("k"));
        let pw = generator.generate("example.com", "alice", 15, 0).unwrap();
        assert_eq!(pw, derive(b"k", "alice@example.com", 15, 0).unwrap());
    }

    #[test]
    fn debug_hides_password() {
        let pw = derive(b"k", "alice@example.com", 15, 0).unwrap();
        assert_eq!(format!("{pw:?}"), "Password(***)");
        assert_eq!(pw.to_string(), "QdwcVtHjAgYkT7V");
    }
}
