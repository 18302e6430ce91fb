//! Character-class policy and the deterministic repair pass.
//!
//! A generated password should contain at least one ASCII digit, one
//! lowercase and one uppercase letter. When a class is missing, a fixed
//! tail position is overwritten with a character picked from the class
//! alphabet by the byte value of the character it replaces:
//!
//! ```text
//! no digit     -> buf[len - 3] = DIGITS[buf[len - 3] % 10]
//! no lowercase -> buf[len - 2] = LOWER[buf[len - 2] % 26]
//! no uppercase -> buf[len - 1] = UPPER[buf[len - 1] % 26]
//! ```
//!
//! All three checks and all three source bytes come from the buffer as it
//! was before the first write, and nothing is re-checked afterwards: a
//! write may replace the only member of another class. Changing any of
//! this changes previously generated passwords.

const DIGITS: &[u8; 10] = b"0123456789";
const LOWER: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Shortest buffer the repair pass can operate on.
pub const MIN_REPAIR_LEN: usize = 3;

/// Password formatting policy selected by the stored `mode` integer.
///
/// Only one policy exists today. Non-zero modes are kept as a tag so
/// records carrying them round-trip, but they format exactly like
/// `Standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Mode 0: digit + lowercase + uppercase.
    Standard,
    /// Any other mode value, reserved for future variants.
    Reserved(i64),
}

impl Policy {
    pub fn from_mode(mode: i64) -> Self {
        match mode {
            0 => Policy::Standard,
            n => Policy::Reserved(n),
        }
    }

    pub fn mode(self) -> i64 {
        match self {
            Policy::Standard => 0,
            Policy::Reserved(n) => n,
        }
    }

    /// Apply this policy to an encoded, substituted password buffer.
    pub fn apply(self, buf: &mut [u8]) {
        match self {
            Policy::Standard | Policy::Reserved(_) => repair(buf),
        }
    }
}

/// Force the presence of a digit, a lowercase and an uppercase letter.
///
/// Buffers shorter than [`MIN_REPAIR_LEN`] are left untouched; callers
/// validate the length before getting here.
pub fn repair(buf: &mut [u8]) {
    let len = buf.len();
    if len < MIN_REPAIR_LEN {
        return;
    }

    let has_digit = buf.iter().any(u8::is_ascii_digit);
    let has_lower = buf.iter().any(u8::is_ascii_lowercase);
    let has_upper = buf.iter().any(u8::is_ascii_uppercase);

    // Positions are distinct, so each write reads an untouched byte.
    if !has_digit {
        let i = len - 3;
        buf[i] = DIGITS[usize::from(buf[i]) % DIGITS.len()];
    }
    if !has_lower {
        let i = len - 2;
        buf[i] = LOWER[usize::from(buf[i]) % LOWER.len()];
    }
    if !has_upper {
        let i = len - 1;
        buf[i] = UPPER[usize::from(buf[i]) % UPPER.len()];
    }
}

/// Rewrite the two non-alphanumeric base64 symbols: `+` -> `0`, `/` -> `1`.
pub fn substitute_symbols(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        match *b {
            b'+' => *b = b'0',
            b'/' => *b = b'1',
            _ => {}
        }
    }
}
