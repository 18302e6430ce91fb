//! Master key handling.
//!
//! The master key is never persisted. It lives in a zeroizing buffer for
//! as long as the process needs it and is wiped when dropped.

use zeroize::Zeroizing;

/// The user's master secret, wiped from memory on drop.
///
/// Any byte sequence is accepted, including the empty key.
pub struct MasterKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl MasterKey {
    /// Create a `MasterKey` from raw bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
        }
    }

    /// Create a `MasterKey` from a typed passphrase (UTF-8 bytes).
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self::new(passphrase.as_bytes().to_vec())
    }

    /// The empty key, used when no key was supplied.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Access the raw key bytes (e.g. to key the HMAC).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Zeroizing<String>> for MasterKey {
    fn from(passphrase: Zeroizing<String>) -> Self {
        Self::from_passphrase(&passphrase)
    }
}

// Keep key material out of debug output.
impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("len", &self.bytes.len())
            .finish()
    }
}
