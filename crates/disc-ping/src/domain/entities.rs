//! Core Domain Entities for Ping Envelopes

use crate::domain::errors::PingError;

/// IP address in its packed wire form.
///
/// The discovery wire format carries raw address bytes, never text, so the
/// address is stored exactly as it is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpAddr {
    /// IPv4 address (4 bytes).
    V4([u8; 4]),
    /// IPv6 address (16 bytes).
    V6([u8; 16]),
}

impl IpAddr {
    /// Create an IPv4 address
    pub fn v4(a: u8, b: u8, c: u8, d: u8) -> Self {
        IpAddr::V4([a, b, c, d])
    }

    /// Create an IPv6 address from bytes
    pub fn v6(bytes: [u8; 16]) -> Self {
        IpAddr::V6(bytes)
    }

    /// Parse packed address bytes. Only 4 and 16 byte inputs are valid.
    pub fn from_octets(bytes: &[u8]) -> Result<Self, PingError> {
        if let Ok(v4) = <[u8; 4]>::try_from(bytes) {
            return Ok(IpAddr::V4(v4));
        }
        if let Ok(v6) = <[u8; 16]>::try_from(bytes) {
            return Ok(IpAddr::V6(v6));
        }
        Err(PingError::MalformedAddress {
            length: bytes.len(),
        })
    }

    /// Packed address bytes (4 or 16).
    pub fn octets(&self) -> &[u8] {
        match self {
            IpAddr::V4(bytes) => &bytes[..],
            IpAddr::V6(bytes) => &bytes[..],
        }
    }
}

impl From<std::net::IpAddr> for IpAddr {
    fn from(ip: std::net::IpAddr) -> Self {
        match ip {
            std::net::IpAddr::V4(v4) => IpAddr::V4(v4.octets()),
            std::net::IpAddr::V6(v6) => IpAddr::V6(v6.octets()),
        }
    }
}

impl From<IpAddr> for std::net::IpAddr {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(bytes) => std::net::IpAddr::V4(std::net::Ipv4Addr::from(bytes)),
            IpAddr::V6(bytes) => std::net::IpAddr::V6(std::net::Ipv6Addr::from(bytes)),
        }
    }
}

impl std::fmt::Display for IpAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&std::net::IpAddr::from(*self), f)
    }
}

/// Unix timestamp in seconds
///
/// Timestamps are clamped to a reasonable maximum so that clock arithmetic
/// cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Maximum reasonable timestamp (year 9999).
    pub const MAX_REASONABLE: u64 = 253_402_300_799;

    /// Create a new timestamp, clamping to MAX_REASONABLE.
    pub fn new(secs: u64) -> Self {
        Self(secs.min(Self::MAX_REASONABLE))
    }

    /// Get the underlying seconds value.
    pub fn as_secs(&self) -> u64 {
        self.0
    }
}
