//! # Network Adapters
//!
//! Production adapters for running the ping codec on a real node.
//!
//! ## Adapters Provided
//!
//! - `SystemTimeSource` - Production time source using system clock
//! - `StaticKeyProvider` - Holds one node key for the process lifetime
//! - `StaticConfigProvider` - Builder-style config for tests and defaults
//! - `TomlConfigProvider` - Config file loading (requires "network" feature)
//! - `UdpTransport` / `PingServer` - tokio UDP I/O (requires "network" feature)

// Semantic submodules
/// Configuration providers
pub mod config;
/// Key providers
pub mod keys;
/// Time source adapters
pub mod time;
/// Transport adapters
#[cfg(feature = "network")]
pub mod transport;

// Re-export public API
pub use config::StaticConfigProvider;
pub use keys::StaticKeyProvider;
pub use time::SystemTimeSource;

#[cfg(feature = "network")]
pub use config::{ConfigError, TomlConfigProvider};

#[cfg(feature = "network")]
pub use transport::{InboundPing, PingServer, ServerError, UdpTransport};
