//! Test utilities for the ping codec.
//!
//! This module provides mock implementations of traits for deterministic testing.
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use disc_ping::test_utils::FixedTimeSource;
//! use disc_ping::TimeSource;
//!
//! let time_source = FixedTimeSource::new(1000);
//! assert_eq!(time_source.now().as_secs(), 1000);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::Timestamp;
use crate::ports::outbound::TimeSource;

/// A time source that returns a fixed timestamp.
///
/// Useful for deterministic testing where time progression needs to be controlled.
#[derive(Debug, Clone)]
pub struct FixedTimeSource {
    timestamp: u64,
}

impl FixedTimeSource {
    /// Create a new fixed time source with the given timestamp (in seconds).
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }

    /// Get the configured timestamp value.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.timestamp)
    }
}

/// Thread-safe TimeSource for tests requiring time advancement.
///
/// Clones share one clock, so a test can hand one clone to a service and
/// keep another to call `advance()`.
///
/// ```rust,ignore
/// use disc_ping::test_utils::ControllableTimeSource;
/// use disc_ping::TimeSource;
///
/// let clock = ControllableTimeSource::new(1000);
/// let handle = clock.clone();
/// handle.advance(61);
/// assert_eq!(clock.now().as_secs(), 1061);
/// ```
#[derive(Debug, Clone)]
pub struct ControllableTimeSource {
    time: Arc<AtomicU64>,
}

impl ControllableTimeSource {
    /// Create a clock starting at `initial` seconds.
    pub fn new(initial: u64) -> Self {
        Self {
            time: Arc::new(AtomicU64::new(initial)),
        }
    }

    /// Advances the clock by the specified seconds.
    pub fn advance(&self, secs: u64) {
        self.time.fetch_add(secs, Ordering::SeqCst);
    }

    /// Jump to an absolute time.
    pub fn set(&self, secs: u64) {
        self.time.store(secs, Ordering::SeqCst);
    }
}

impl TimeSource for ControllableTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::new(self.time.load(Ordering::SeqCst))
    }
}
