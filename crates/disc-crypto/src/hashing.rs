//! # Keccak-256 Hashing
//!
//! The discovery wire format hashes with the original Keccak submission
//! (pre-NIST padding). `sha3::Keccak256` is that variant; `sha3::Sha3_256`
//! would NOT interoperate.

use sha3::{Digest, Keccak256};

/// Keccak-256 hash output (256-bit).
pub type Hash = [u8; 32];

/// Stateful Keccak-256 hasher.
///
/// Lets callers hash `signature || packet_type || payload` without first
/// concatenating the parts into a new buffer.
#[derive(Clone)]
pub struct Keccak256Hasher {
    inner: Keccak256,
}

impl Keccak256Hasher {
    /// Create new hasher.
    pub fn new() -> Self {
        Self {
            inner: Keccak256::new(),
        }
    }

    /// Update with data.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);
        self
    }

    /// Finalize and return hash.
    pub fn finalize(self) -> Hash {
        self.inner.finalize().into()
    }
}

impl Default for Keccak256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash data with Keccak-256 (one-shot).
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// Hash the concatenation of multiple inputs.
pub fn keccak256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256Hasher::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize()
}
