//! # Disc-Ping Test Suite
//!
//! Workspace-level tests that exercise the crates together.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── ping_flow.rs   # build -> seal -> open -> decode through the public API
//! │   ├── interop.rs     # cross-checks against libsecp256k1 and raw Keccak
//! │   └── udp_flow.rs    # two nodes over loopback UDP
//! └── benches/
//!     └── codec_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p disc-tests
//! cargo test -p disc-tests integration::interop
//!
//! # Benchmarks
//! cargo bench -p disc-tests
//! ```

#![allow(dead_code)]
