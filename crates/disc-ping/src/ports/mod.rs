//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** the codec API this crate exposes
//! - **Driven Ports (Outbound):** clock, key, transport and config SPIs
//!   the host application supplies

pub mod inbound;
pub mod outbound;

pub use inbound::{PingCodecApi, ReceivedPing};
pub use outbound::{ConfigProvider, DatagramTransport, KeyProvider, NetworkError, TimeSource};
