//! # Disc Crypto - Discovery Packet Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Envelope integrity hash, signing digest, node ids |
//! | `ecdsa` | secp256k1 (recoverable) | Envelope signatures, sender identity |
//!
//! ## Security Properties
//!
//! - **Keccak-256**: legacy Keccak padding (Ethereum), NOT NIST SHA3-256
//! - **secp256k1**: RFC 6979 deterministic nonces, low-S normalized signatures
//! - **Key recovery**: the sender's public key is derived from signature + digest,
//!   so identity cannot be claimed separately from the signature

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use ecdsa::{NodePublicKey, RecoverableSignature, Secp256k1KeyPair};
pub use errors::CryptoError;
pub use hashing::{keccak256, keccak256_many, Hash, Keccak256Hasher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
