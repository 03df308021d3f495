//! Value Objects for Ping Envelopes

use std::time::Duration;

/// Size of the Keccak-256 integrity hash at the head of every envelope.
pub const HASH_SIZE: usize = 32;

/// Size of a recoverable signature: r(32) || s(32) || recovery_id(1).
pub const SIGNATURE_SIZE: usize = 65;

/// Size of the packet type tag.
pub const PACKET_TYPE_SIZE: usize = 1;

/// Smallest well-formed envelope (empty payload).
pub const MIN_ENVELOPE_SIZE: usize = HASH_SIZE + SIGNATURE_SIZE + PACKET_TYPE_SIZE;

/// Largest datagram a discovery node will send or accept.
pub const MAX_PACKET_SIZE: usize = 1280;

/// Protocol version carried in Ping payloads.
pub const PING_VERSION: u8 = 4;

/// Default validity window added to "now" to form a Ping's expiration.
pub const DEFAULT_VALIDITY_WINDOW: Duration = Duration::from_secs(60);

/// One-byte tag identifying which message variant a payload encodes.
///
/// Carried as a raw byte so envelopes with types this crate does not
/// decode still verify; the caller decides what to do with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PacketType(pub u8);

impl PacketType {
    /// Liveness probe.
    pub const PING: Self = Self(0x01);
    /// Reply to a Ping (not decoded by this crate).
    pub const PONG: Self = Self(0x02);
    /// Node lookup request (not decoded by this crate).
    pub const FIND_NODE: Self = Self(0x03);
    /// Node lookup reply (not decoded by this crate).
    pub const NEIGHBORS: Self = Self(0x04);

    /// Get the raw tag byte.
    pub fn as_byte(&self) -> u8 {
        self.0
    }
}

impl From<u8> for PacketType {
    fn from(byte: u8) -> Self {
        Self(byte)
    }
}

impl std::fmt::Display for PacketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::PING => write!(f, "PING"),
            Self::PONG => write!(f, "PONG"),
            Self::FIND_NODE => write!(f, "FIND_NODE"),
            Self::NEIGHBORS => write!(f, "NEIGHBORS"),
            Self(other) => write!(f, "UNKNOWN({:#04x})", other),
        }
    }
}

/// Configuration for building Ping messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingConfig {
    /// Protocol version written into every Ping (default: 4)
    pub version: u8,
    /// Added to the current time to form the expiration (default: 60 seconds).
    /// Must be at least one whole second.
    pub validity_window: Duration,
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            version: PING_VERSION,
            validity_window: DEFAULT_VALIDITY_WINDOW,
        }
    }
}

impl PingConfig {
    /// Create a config suitable for testing (short window)
    pub fn for_testing() -> Self {
        Self {
            version: PING_VERSION,
            validity_window: Duration::from_secs(5),
        }
    }
}
