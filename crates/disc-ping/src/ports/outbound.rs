//! # Driven Ports (Outbound SPI)
//!
//! These are the interfaces this crate **requires** the host application to implement.

use std::sync::Arc;

use async_trait::async_trait;
use disc_crypto::{NodePublicKey, Secp256k1KeyPair};
use thiserror::Error;

use crate::domain::{Endpoint, PingConfig, Timestamp};

/// Abstract interface for time-related operations.
///
/// Enables deterministic testing by injecting controllable time sources.
/// Production implementations use system time; tests use fixed timestamps.
pub trait TimeSource: Send + Sync {
    /// Get the current timestamp.
    fn now(&self) -> Timestamp;
}

/// Source of the node's signing identity.
///
/// The key is handed out behind an `Arc` so concurrent signers share one
/// read-only copy of the secret.
///
/// # Example Implementation
///
/// ```rust,ignore
/// struct VaultKeyProvider { vault: Vault }
///
/// impl KeyProvider for VaultKeyProvider {
///     fn current_key(&self) -> Option<Arc<Secp256k1KeyPair>> {
///         self.vault.unsealed_node_key()
///     }
/// }
/// ```
pub trait KeyProvider: Send + Sync {
    /// The key to sign outgoing envelopes with, if one is loaded.
    fn current_key(&self) -> Option<Arc<Secp256k1KeyPair>>;

    /// Public identity matching `current_key`.
    fn public_key(&self) -> Option<NodePublicKey> {
        self.current_key().map(|key| key.public_key())
    }
}

/// Abstract interface for datagram I/O.
///
/// One envelope per datagram. Implementations must be `Send + Sync` so a
/// listener task and senders can share one socket.
#[async_trait]
pub trait DatagramTransport: Send + Sync {
    /// Send one datagram.
    async fn send_to(&self, data: &[u8], target: std::net::SocketAddr)
        -> Result<(), NetworkError>;

    /// Receive one datagram into `buf`, returning its length and source.
    async fn recv_from(
        &self,
        buf: &mut [u8],
    ) -> Result<(usize, std::net::SocketAddr), NetworkError>;
}

/// Errors from network operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NetworkError {
    /// Operation timed out waiting for response
    #[error("network operation timed out")]
    Timeout,
    /// Remote peer refused connection
    #[error("connection refused by peer")]
    ConnectionRefused,
    /// Invalid socket address
    #[error("invalid socket address")]
    InvalidAddress,
    /// Message exceeds maximum allowed size
    #[error("message exceeds maximum size")]
    MessageTooLarge,
    /// Any other socket failure
    #[error("socket error: {0}")]
    Io(String),
}

impl From<std::io::Error> for NetworkError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => Self::Timeout,
            std::io::ErrorKind::ConnectionRefused => Self::ConnectionRefused,
            std::io::ErrorKind::InvalidInput | std::io::ErrorKind::AddrNotAvailable => {
                Self::InvalidAddress
            }
            _ => Self::Io(err.to_string()),
        }
    }
}

/// Abstract interface for configuration loading.
///
/// Allows different configuration sources (file, environment, etc.)
pub trait ConfigProvider: Send + Sync {
    /// Local socket address to bind the datagram transport to.
    fn get_bind_address(&self) -> std::net::SocketAddr;

    /// Endpoint this node advertises as `from`.
    fn get_local_endpoint(&self) -> Endpoint;

    /// Endpoints to ping at startup.
    fn get_ping_targets(&self) -> Vec<Endpoint>;

    /// Ping building parameters (version, validity window).
    fn get_ping_config(&self) -> PingConfig;
}
