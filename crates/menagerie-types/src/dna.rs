//! Fixed-width genetic value type.

use serde::{Deserialize, Serialize};

/// Number of bytes in a creature's DNA value.
pub const DNA_SIZE: usize = 32;

/// A creature's 32-byte genetic value.
///
/// DNA is opaque to the registry: derived exactly once at creation (a
/// digest of entropy material for minted creatures, a digest of parent
/// halves for bred ones) and never mutated afterwards. Distinctness is not
/// guaranteed and nothing depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dna([u8; DNA_SIZE]);

impl Dna {
    /// Wrap raw DNA bytes.
    pub const fn from_bytes(bytes: [u8; DNA_SIZE]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw DNA bytes.
    pub const fn as_bytes(&self) -> &[u8; DNA_SIZE] {
        &self.0
    }

    /// Copy out the raw DNA bytes.
    pub const fn into_bytes(self) -> [u8; DNA_SIZE] {
        self.0
    }
}

impl core::fmt::Display for Dna {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Lowercase hex, no separators.
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; DNA_SIZE]> for Dna {
    fn from(bytes: [u8; DNA_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Dna> for [u8; DNA_SIZE] {
    fn from(dna: Dna) -> Self {
        dna.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_lowercase_hex() {
        let mut bytes = [0u8; DNA_SIZE];
        bytes[0] = 0x0f;
        bytes[31] = 0xab;
        let rendered = Dna::from_bytes(bytes).to_string();
        assert_eq!(rendered.len(), 64);
        assert!(rendered.starts_with("0f"));
        assert!(rendered.ends_with("ab"));
    }

    #[test]
    fn byte_roundtrip() {
        let bytes = [7u8; DNA_SIZE];
        assert_eq!(Dna::from_bytes(bytes).into_bytes(), bytes);
    }
}
