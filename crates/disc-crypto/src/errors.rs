//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Key material is not valid hex
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Invalid signature (r or s out of range)
    #[error("Invalid signature")]
    InvalidSignature,

    /// Recovery id byte is not 0 or 1 (2 and 3 never occur for real keys)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery produced no valid point
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Signing the digest failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}
