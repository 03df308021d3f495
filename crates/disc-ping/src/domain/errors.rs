//! Domain Errors for Ping Envelopes
//!
//! Every rejection on the receive path is a normal, typed outcome. Nothing
//! in the domain panics, logs, or retries.

use disc_crypto::CryptoError;
use thiserror::Error;

/// Errors produced while building, sealing or opening a Ping envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PingError {
    /// Address field is neither 4 nor 16 bytes
    #[error("Malformed address: expected 4 or 16 bytes, got {length}")]
    MalformedAddress { length: usize },

    /// Port field is not exactly 2 bytes
    #[error("Malformed port: expected 2 bytes, got {length}")]
    MalformedPort { length: usize },

    /// Datagram too short to hold hash, signature and packet type
    #[error("Malformed envelope: {length} bytes is below the {minimum} byte minimum")]
    MalformedEnvelope { length: usize, minimum: usize },

    /// Payload is not the RLP structure the packet type requires
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Datagram exceeds the maximum discovery packet size
    #[error("Packet too large: {length} bytes exceeds {maximum}")]
    PacketTooLarge { length: usize, maximum: usize },

    /// Outer hash does not match `keccak256(signature || type || payload)`
    #[error("Integrity hash mismatch")]
    IntegrityMismatch,

    /// Public key recovery failed (bad recovery id, bad scalars, no point)
    #[error("Invalid signature: {0}")]
    InvalidSignature(#[from] CryptoError),

    /// Decoded expiration is already in the past
    #[error("Expired message: expiration {expiration} is before now {now}")]
    ExpiredMessage { expiration: u32, now: u64 },

    /// Envelope carries a different packet type than the caller expected
    #[error("Unexpected packet type: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedPacketType { expected: u8, actual: u8 },

    /// Validity window is zero whole seconds
    #[error("Invalid validity window: must be at least one second")]
    InvalidValidityWindow,

    /// Expiration does not fit the u32 wire field
    #[error("Timestamp out of range: {0} does not fit in u32 seconds")]
    TimestampOutOfRange(u64),

    /// Signing attempted without a usable private key
    #[error("Private key unavailable")]
    KeyUnavailable,
}

impl From<rlp::DecoderError> for PingError {
    fn from(err: rlp::DecoderError) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}
