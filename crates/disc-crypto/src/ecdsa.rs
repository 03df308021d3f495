//! # Recoverable ECDSA Signatures (secp256k1)
//!
//! Signing and public-key recovery for discovery envelopes.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S signatures on signing (EIP-2); recovery accepts either form
//! - Secret key material is zeroized on drop
//!
//! ## Wire Forms
//!
//! - Signature: 65 bytes, `r(32) || s(32) || recovery_id(1)`
//! - Public key: 64 bytes, uncompressed point without the `0x04` prefix

use std::fmt;

use crate::hashing::{keccak256, Hash};
use crate::CryptoError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use zeroize::Zeroize;

/// Length of a recoverable signature on the wire.
pub const SIGNATURE_LEN: usize = 65;

/// Length of a node public key on the wire.
pub const PUBLIC_KEY_LEN: usize = 64;

/// Uncompressed secp256k1 public key (64 bytes, `x || y`).
///
/// This is the form discovery nodes use as their identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePublicKey([u8; PUBLIC_KEY_LEN]);

impl NodePublicKey {
    /// Create from the 64-byte `x || y` form, checking the point is on the curve.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Result<Self, CryptoError> {
        let mut sec1 = [0u8; PUBLIC_KEY_LEN + 1];
        sec1[0] = 0x04;
        sec1[1..].copy_from_slice(&bytes);
        VerifyingKey::from_sec1_bytes(&sec1).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Create from a hex string (with or without `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let raw = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let bytes: [u8; PUBLIC_KEY_LEN] =
            raw.as_slice()
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: PUBLIC_KEY_LEN,
                    actual: raw.len(),
                })?;
        Self::from_bytes(bytes)
    }

    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let mut bytes = [0u8; PUBLIC_KEY_LEN];
        // Uncompressed SEC1 is always 0x04 || x(32) || y(32)
        bytes.copy_from_slice(&point.as_bytes()[1..]);
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Node identifier: Keccak-256 of the 64-byte public key.
    pub fn node_id(&self) -> Hash {
        keccak256(&self.0)
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for NodePublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodePublicKey({}..)", &self.to_hex()[..16])
    }
}

impl fmt::Display for NodePublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Recoverable ECDSA signature (65 bytes, `r || s || v`).
///
/// Construction never validates; a malformed signature is only detected
/// by [`RecoverableSignature::recover`], which is where the receive path
/// needs the typed failure.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature([u8; SIGNATURE_LEN]);

impl RecoverableSignature {
    /// Create from bytes (65 bytes).
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, failing if it is not exactly 65 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; SIGNATURE_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: SIGNATURE_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// The recovery id byte.
    pub fn recovery_byte(&self) -> u8 {
        self.0[64]
    }

    /// Recover the signer's public key from a 32-byte prehashed digest.
    ///
    /// # Errors
    ///
    /// - `InvalidRecoveryId` if `v` is not 0 or 1
    /// - `InvalidSignature` if `r` or `s` is zero or not below the curve order
    /// - `RecoveryFailed` if no valid point is recovered
    ///
    /// High-S signatures are accepted. `(r, n - s)` with the opposite parity
    /// recovers the same key as `(r, s)`, so they are normalized first.
    pub fn recover(&self, digest: &Hash) -> Result<NodePublicKey, CryptoError> {
        let v = self.recovery_byte();
        if v > 1 {
            return Err(CryptoError::InvalidRecoveryId(v));
        }
        let recovery_id = RecoveryId::from_byte(v).ok_or(CryptoError::InvalidRecoveryId(v))?;

        let sig =
            Signature::from_slice(&self.0[..64]).map_err(|_| CryptoError::InvalidSignature)?;

        let (sig, recovery_id) = match sig.normalize_s() {
            Some(low) => (
                low,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (sig, recovery_id),
        };

        let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
            .map_err(|_| CryptoError::RecoveryFailed)?;

        Ok(NodePublicKey::from_verifying_key(&key))
    }
}

impl fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecoverableSignature(0x{})", hex::encode(self.0))
    }
}

/// secp256k1 ECDSA keypair.
///
/// The secret scalar is zeroized by `SigningKey` when the pair is dropped.
/// Intermediate buffers created here are wiped explicitly.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_slice(&bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Create from a 64-character hex secret (with or without `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let mut raw = hex::decode(s.trim().trim_start_matches("0x"))
            .map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let result = match <[u8; 32]>::try_from(raw.as_slice()) {
            Ok(mut bytes) => {
                let pair = Self::from_bytes(bytes);
                bytes.zeroize();
                pair
            }
            Err(_) => Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: raw.len(),
            }),
        };
        raw.zeroize();
        result
    }

    /// Get the 64-byte node public key.
    pub fn public_key(&self) -> NodePublicKey {
        NodePublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte digest, producing a recoverable signature.
    ///
    /// The digest is used as-is (it is NOT hashed again).
    pub fn sign_recoverable(&self, digest: &Hash) -> Result<RecoverableSignature, CryptoError> {
        let (sig, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        let mut bytes = [0u8; SIGNATURE_LEN];
        let rs: [u8; 64] = sig.to_bytes().into();
        bytes[..64].copy_from_slice(&rs);
        bytes[64] = recovery_id.to_byte();
        Ok(RecoverableSignature(bytes))
    }

    /// Get secret key bytes (for serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}
