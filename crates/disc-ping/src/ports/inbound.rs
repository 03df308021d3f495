//! # Driving Ports (Inbound API)
//!
//! These are the public APIs this crate exposes to the application node.

use disc_crypto::{Hash, NodePublicKey};

use crate::domain::{Endpoint, Envelope, PingError, PingMessage, VerifiedEnvelope};

/// A Ping that passed every check: integrity, signature, packet type,
/// payload shape and freshness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedPing {
    /// Decoded message.
    pub ping: PingMessage,
    /// Public key recovered from the envelope signature.
    pub sender: NodePublicKey,
    /// Integrity hash of the datagram. A Pong echoes this value.
    pub hash: Hash,
}

/// Primary API for building, sealing and checking Ping packets.
///
/// # Example
///
/// ```rust,ignore
/// use disc_ping::ports::PingCodecApi;
///
/// fn send_one<T: PingCodecApi>(api: &T, from: Endpoint, to: Endpoint) -> Vec<u8> {
///     api.seal_ping(from, to).unwrap().to_wire()
/// }
/// ```
pub trait PingCodecApi {
    /// Build a Ping using the configured version and the current time plus
    /// the validity window as expiration.
    fn build_ping(&self, from: Endpoint, to: Endpoint) -> Result<PingMessage, PingError>;

    /// Build a Ping and seal it with the node key.
    ///
    /// # Errors
    ///
    /// - `KeyUnavailable` if the key provider has no key loaded
    /// - anything `build_ping` or `Envelope::seal` reports
    fn seal_ping(&self, from: Endpoint, to: Endpoint) -> Result<Envelope, PingError>;

    /// Authenticate a datagram without applying any message policy.
    fn open(&self, raw: &[u8]) -> Result<VerifiedEnvelope, PingError>;

    /// Authenticate a datagram and accept it only if it is a fresh Ping.
    ///
    /// # Errors
    ///
    /// - envelope errors from `open`
    /// - `UnexpectedPacketType` if the packet type is not Ping
    /// - `MalformedPayload` / `MalformedAddress` / `MalformedPort` on decode
    /// - `ExpiredMessage` if the expiration lies in the past
    fn receive_ping(&self, raw: &[u8]) -> Result<ReceivedPing, PingError>;

    /// Public key of the node key, if one is loaded.
    fn local_public_key(&self) -> Option<NodePublicKey>;
}
