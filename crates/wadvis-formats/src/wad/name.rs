//! Canonical lump names
//!
//! Every name that enters the archive, whether read from a directory entry,
//! passed to the writer, or used as a lookup key, goes through
//! [`LumpName::normalize`]. Lookups compare canonical names byte for byte,
//! which is what makes lookups case-insensitive and makes reader and writer
//! agree on what a name is.

use std::fmt;

use crate::wad::constants::{NAME_BYTES, NAME_SIGNIFICANT};

/// Canonical 12-byte lump identifier
///
/// At most 8 significant ASCII-uppercased bytes followed by zero padding.
/// Only the first 8 bytes are persisted in a directory entry; the remaining
/// 4 are always zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LumpName([u8; NAME_BYTES]);

impl LumpName {
    /// The empty name (all zero bytes)
    pub const EMPTY: Self = Self([0; NAME_BYTES]);

    /// Canonicalize raw name bytes
    ///
    /// Copies bytes up to the first NUL or the 8th byte, whichever comes
    /// first, upper-casing ASCII letters. Everything after is zero.
    pub fn normalize(raw: impl AsRef<[u8]>) -> Self {
        let mut out = [0u8; NAME_BYTES];
        for (dst, &src) in out
            .iter_mut()
            .zip(raw.as_ref().iter().take_while(|&&b| b != 0))
            .take(NAME_SIGNIFICANT)
        {
            *dst = src.to_ascii_uppercase();
        }
        Self(out)
    }

    /// Get the full 12-byte identifier
    pub fn as_bytes(&self) -> &[u8; NAME_BYTES] {
        &self.0
    }

    /// Get the 8 bytes that are written to a directory entry
    pub fn to_disk(&self) -> [u8; NAME_SIGNIFICANT] {
        let mut out = [0u8; NAME_SIGNIFICANT];
        out.copy_from_slice(&self.0[..NAME_SIGNIFICANT]);
        out
    }

    /// Get the significant bytes without padding
    pub fn trimmed(&self) -> &[u8] {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(NAME_BYTES);
        &self.0[..end]
    }

    /// Number of significant bytes
    pub fn len(&self) -> usize {
        self.trimmed().len()
    }

    /// Check if the name has no significant bytes
    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    /// Check if the name begins with `prefix` (compared canonically)
    pub fn starts_with(&self, prefix: &str) -> bool {
        let prefix = Self::normalize(prefix);
        self.trimmed().starts_with(prefix.trimmed())
    }

    /// Render the name as text, replacing non-UTF-8 bytes
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.trimmed()).into_owned()
    }
}

impl From<&str> for LumpName {
    fn from(name: &str) -> Self {
        Self::normalize(name)
    }
}

impl PartialEq<&str> for LumpName {
    fn eq(&self, other: &&str) -> bool {
        *self == Self::normalize(other)
    }
}

impl fmt::Display for LumpName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl AsRef<[u8]> for LumpName {
    fn as_ref(&self) -> &[u8] {
        self.trimmed()
    }
}

impl fmt::Debug for LumpName {
    // Raw bytes, escaped, so distinct names never print the same
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LumpName(\"{}\")", self.trimmed().escape_ascii())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_uppercases_and_pads() {
        let name = LumpName::normalize("floor");
        assert_eq!(name.as_bytes(), b"FLOOR\0\0\0\0\0\0\0");
        assert_eq!(name.to_string(), "FLOOR");
        assert_eq!(name.len(), 5);
    }

    #[test]
    fn test_non_ascii_bytes_are_kept() {
        let name = LumpName::normalize([0xC8, b'x', b'y']);
        assert_eq!(name.trimmed(), &[0xC8, b'X', b'Y']);
        assert_eq!(LumpName::normalize(name), name);
    }

    #[test]
    fn test_debug_shows_raw_bytes() {
        let high = LumpName::normalize([0xC8, b'X', b'Y']);
        let other = LumpName::normalize([0xC9, b'X', b'Y']);
        assert_eq!(format!("{high:?}"), r#"LumpName("\xc8XY")"#);
        assert_ne!(format!("{high:?}"), format!("{other:?}"));
        assert_eq!(format!("{:?}", LumpName::from("floor")), r#"LumpName("FLOOR")"#);
    }

    #[test]
    fn test_normalize_truncates_to_eight() {
        let name = LumpName::normalize("gl_e1m1_extra");
        assert_eq!(name.as_bytes(), b"GL_E1M1_\0\0\0\0");
        assert_eq!(name.to_disk(), *b"GL_E1M1_");
    }

    #[test]
    fn test_normalize_stops_at_nul() {
        let name = LumpName::normalize(b"MAP\0JUNK");
        assert_eq!(name.as_bytes(), b"MAP\0\0\0\0\0\0\0\0\0");
    }

    #[test]
    fn test_empty_name() {
        assert!(LumpName::normalize("").is_empty());
        assert_eq!(LumpName::normalize(""), LumpName::EMPTY);
        assert_eq!(LumpName::EMPTY.to_string(), "");
    }

    #[test]
    fn test_case_insensitive_equality() {
        assert_eq!(LumpName::from("Things"), LumpName::from("THINGS"));
        assert!(LumpName::from("linedefs") == "LineDefs");
        assert_ne!(LumpName::from("SEGS"), LumpName::from("GL_SEGS"));
    }

    #[test]
    fn test_starts_with() {
        let name = LumpName::from("GL_MAP01");
        assert!(name.starts_with("gl_"));
        assert!(!name.starts_with("MAP"));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in prop::collection::vec(any::<u8>(), 0..20)) {
            let once = LumpName::normalize(&raw);
            let twice = LumpName::normalize(once.as_bytes());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_ignores_ascii_case(raw in "[a-zA-Z0-9_]{0,12}") {
            let lower = LumpName::normalize(raw.to_ascii_lowercase());
            let upper = LumpName::normalize(raw.to_ascii_uppercase());
            prop_assert_eq!(lower, upper);
            prop_assert!(lower.len() <= 8);
            prop_assert!(lower.as_bytes()[8..].iter().all(|&b| b == 0));
        }
    }
}
