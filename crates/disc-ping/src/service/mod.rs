//! # Ping Service
//!
//! High-level service implementing the `PingCodecApi` port.
//!
//! The service owns the policy the pure codec leaves out: which key signs,
//! what time it is, which packet types are acceptable and whether a message
//! is still fresh. Rejections are logged here, never in the domain.

// Semantic submodules
mod api;
mod core;

// Re-export public API
pub use core::PingService;
