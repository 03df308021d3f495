//! # Signed Envelope
//!
//! The only unit ever placed on the wire:
//!
//! ```text
//! offset  size  field
//! 0       32    hash      = keccak256(signature || packet_type || payload)
//! 32      65    signature = sign(keccak256(packet_type || payload))
//! 97      1     packet_type
//! 98      N     payload
//! ```
//!
//! ## Two-Layer Hashing
//!
//! The signature covers `packet_type || payload`. The outer hash covers the
//! signature as well, so a receiver can check integrity before paying for
//! key recovery, and the envelope is self-verifying without the sender's
//! public key: the key is *recovered* from the signature.

use disc_crypto::{keccak256_many, Hash, NodePublicKey, RecoverableSignature, Secp256k1KeyPair};

use crate::domain::{
    PacketType, PingError, HASH_SIZE, MAX_PACKET_SIZE, MIN_ENVELOPE_SIZE, SIGNATURE_SIZE,
};

/// A sealed discovery packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    hash: Hash,
    signature: RecoverableSignature,
    packet_type: PacketType,
    payload: Vec<u8>,
}

/// Result of opening an envelope: what the caller needs to decode and
/// attribute the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedEnvelope {
    /// Integrity hash of the datagram (usable as a packet id).
    pub hash: Hash,
    /// Message variant tag.
    pub packet_type: PacketType,
    /// Raw payload for variant-specific decoding.
    pub payload: Vec<u8>,
    /// Sender identity recovered from the signature.
    pub sender: NodePublicKey,
}

impl Envelope {
    /// Sign and wrap a payload.
    ///
    /// # Errors
    ///
    /// - `PacketTooLarge` if the datagram would exceed `MAX_PACKET_SIZE`
    /// - `KeyUnavailable` if the key cannot produce a signature
    pub fn seal(
        packet_type: PacketType,
        payload: Vec<u8>,
        key: &Secp256k1KeyPair,
    ) -> Result<Self, PingError> {
        let length = MIN_ENVELOPE_SIZE + payload.len();
        if length > MAX_PACKET_SIZE {
            return Err(PingError::PacketTooLarge {
                length,
                maximum: MAX_PACKET_SIZE,
            });
        }

        let digest = signing_digest(packet_type, &payload);
        let signature = key
            .sign_recoverable(&digest)
            .map_err(|_| PingError::KeyUnavailable)?;
        let hash = integrity_hash(&signature, packet_type, &payload);

        Ok(Self {
            hash,
            signature,
            packet_type,
            payload,
        })
    }

    /// Split, integrity-check and authenticate a received datagram.
    ///
    /// Any byte sequence is accepted as input; every rejection is an `Err`.
    ///
    /// # Errors
    ///
    /// - `MalformedEnvelope` if shorter than hash + signature + type
    /// - `PacketTooLarge` if longer than `MAX_PACKET_SIZE`
    /// - `IntegrityMismatch` if the outer hash does not match
    /// - `InvalidSignature` if no public key can be recovered
    pub fn open(raw: &[u8]) -> Result<VerifiedEnvelope, PingError> {
        let envelope = Self::from_wire(raw)?;

        if integrity_hash(&envelope.signature, envelope.packet_type, &envelope.payload)
            != envelope.hash
        {
            return Err(PingError::IntegrityMismatch);
        }

        let digest = signing_digest(envelope.packet_type, &envelope.payload);
        let sender = envelope
            .signature
            .recover(&digest)
            .map_err(PingError::InvalidSignature)?;

        Ok(VerifiedEnvelope {
            hash: envelope.hash,
            packet_type: envelope.packet_type,
            payload: envelope.payload,
            sender,
        })
    }

    /// Split a datagram into its fields without checking anything but length.
    pub fn from_wire(raw: &[u8]) -> Result<Self, PingError> {
        if raw.len() < MIN_ENVELOPE_SIZE {
            return Err(PingError::MalformedEnvelope {
                length: raw.len(),
                minimum: MIN_ENVELOPE_SIZE,
            });
        }
        if raw.len() > MAX_PACKET_SIZE {
            return Err(PingError::PacketTooLarge {
                length: raw.len(),
                maximum: MAX_PACKET_SIZE,
            });
        }

        let (hash_bytes, rest) = raw.split_at(HASH_SIZE);
        let (signature_bytes, rest) = rest.split_at(SIGNATURE_SIZE);
        let (type_byte, payload) = rest.split_at(1);

        let mut hash = [0u8; HASH_SIZE];
        hash.copy_from_slice(hash_bytes);
        let mut signature = [0u8; SIGNATURE_SIZE];
        signature.copy_from_slice(signature_bytes);

        Ok(Self {
            hash,
            signature: RecoverableSignature::from_bytes(signature),
            packet_type: PacketType(type_byte[0]),
            payload: payload.to_vec(),
        })
    }

    /// Serialize to `hash || signature || packet_type || payload`.
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MIN_ENVELOPE_SIZE + self.payload.len());
        out.extend_from_slice(&self.hash);
        out.extend_from_slice(self.signature.as_bytes());
        out.push(self.packet_type.as_byte());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Integrity hash.
    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    /// Recoverable signature over `packet_type || payload`.
    pub fn signature(&self) -> &RecoverableSignature {
        &self.signature
    }

    /// Packet type tag.
    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    /// Serialized payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Digest that gets signed: `keccak256(packet_type || payload)`.
pub fn signing_digest(packet_type: PacketType, payload: &[u8]) -> Hash {
    keccak256_many(&[&[packet_type.as_byte()], payload])
}

/// Outer hash: `keccak256(signature || packet_type || payload)`.
pub fn integrity_hash(
    signature: &RecoverableSignature,
    packet_type: PacketType,
    payload: &[u8],
) -> Hash {
    keccak256_many(&[signature.as_bytes(), &[packet_type.as_byte()], payload])
}
