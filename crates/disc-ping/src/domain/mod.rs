//! Domain Layer - Pure codec logic with no I/O
//!
//! This module contains:
//! - Packed IP addresses and timestamps
//! - The Endpoint codec
//! - The Ping message (build, RLP payload, expiration policy)
//! - The signed envelope (seal / open)
//!
//! Nothing here reads a clock, touches a socket, or logs. Clocks and keys
//! are passed in by the service layer.

pub mod endpoint;
pub mod entities;
pub mod envelope;
pub mod errors;
pub mod message;
pub mod value_objects;

pub use endpoint::*;
pub use entities::*;
pub use envelope::*;
pub use errors::*;
pub use message::*;
pub use value_objects::*;
