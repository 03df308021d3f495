//! # Discovery Ping Envelope Codec
//!
//! Builds, signs and verifies the first message of the UDP node discovery
//! handshake: a Ping carried in a self-authenticating envelope.
//!
//! ```text
//! hash(32) || signature(65) || packet_type(1) || rlp([version, from, to, expiration])
//! ```
//!
//! ## Pure Core
//!
//! The core library (domain, ports, service) performs no I/O. Clocks and
//! keys are injected through ports. Sockets and config files are
//! feature-gated:
//!
//! - `network` - tokio UDP transport, `PingServer`, TOML config
//! - `test-utils` - `FixedTimeSource`, `ControllableTimeSource`
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Endpoint codec, Ping message, signed envelope
//! - **Ports Layer:** Trait definitions for external dependencies
//! - **Service Layer:** Wires domain to ports and applies receive policy
//! - **Adapters Layer:** Concrete implementations
//!
//! ## Example
//!
//! ```rust
//! use disc_ping::{Endpoint, Envelope, IpAddr, PingMessage, Timestamp};
//! use disc_crypto::Secp256k1KeyPair;
//! use std::time::Duration;
//!
//! let key = Secp256k1KeyPair::generate();
//! let from = Endpoint::new(IpAddr::v4(192, 168, 1, 192), 30303, 30303);
//! let to = Endpoint::new(IpAddr::v4(127, 0, 0, 1), 30303, 30303);
//!
//! let ping = PingMessage::build(4, from, to, Duration::from_secs(60), Timestamp::new(1_700_000_000)).unwrap();
//! let wire = Envelope::seal(PingMessage::PACKET_TYPE, ping.serialize(), &key).unwrap().to_wire();
//!
//! let opened = Envelope::open(&wire).unwrap();
//! assert_eq!(opened.sender, key.public_key());
//! assert_eq!(PingMessage::decode(&opened.payload).unwrap(), ping);
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod service;

/// Adapters for external integrations.
/// Socket and file adapters require feature: `network`
pub mod adapters;

/// Test utilities (FixedTimeSource, ControllableTimeSource)
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// =============================================================================
// CORE RE-EXPORTS (Always Available)
// =============================================================================

// Domain entities
pub use domain::{
    Endpoint, Envelope, IpAddr, PacketType, PingConfig, PingError, PingMessage, Timestamp,
    VerifiedEnvelope,
};

// Wire constants
pub use domain::{HASH_SIZE, MAX_PACKET_SIZE, MIN_ENVELOPE_SIZE, PING_VERSION, SIGNATURE_SIZE};

// Port traits
pub use ports::{
    ConfigProvider, DatagramTransport, KeyProvider, NetworkError, PingCodecApi, ReceivedPing,
    TimeSource,
};

// Service
pub use service::PingService;

// =============================================================================
// ADAPTER RE-EXPORTS
// =============================================================================

pub use adapters::{StaticConfigProvider, StaticKeyProvider, SystemTimeSource};

// Network adapters (tokio-based)
#[cfg(feature = "network")]
pub use adapters::{ConfigError, InboundPing, PingServer, ServerError, TomlConfigProvider, UdpTransport};

// =============================================================================
// TEST UTILITIES (Requires `test-utils` feature)
// =============================================================================

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::{ControllableTimeSource, FixedTimeSource};
