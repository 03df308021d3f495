//! # Adapters
//!
//! Concrete implementations of the outbound ports.
//!
//! - `SystemTimeSource`, `StaticKeyProvider`, `StaticConfigProvider` have
//!   no extra dependencies and are always available
//! - `UdpTransport`, `PingServer`, `TomlConfigProvider` require the
//!   `network` feature

pub mod network;

pub use network::*;
