//! # Endpoint Codec
//!
//! An endpoint is the `(address, udp_port, tcp_port)` triple a node
//! advertises. On the wire it is an RLP list of three byte strings:
//!
//! ```text
//! [ address(4 | 16), udp_port(2, BE), tcp_port(2, BE) ]
//! ```
//!
//! Ports are fixed-width: unlike RLP integers they keep leading zero bytes.

use rlp::{Encodable, Rlp, RlpStream};

use crate::domain::{IpAddr, PingError};

/// Wire width of a port field.
pub const PORT_SIZE: usize = 2;

/// A reachable network location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    /// Packed IP address.
    pub address: IpAddr,
    /// Discovery (UDP) port.
    pub udp_port: u16,
    /// Data (TCP) port.
    pub tcp_port: u16,
}

impl Endpoint {
    /// Create a new endpoint.
    pub fn new(address: IpAddr, udp_port: u16, tcp_port: u16) -> Self {
        Self {
            address,
            udp_port,
            tcp_port,
        }
    }

    /// Canonical field triple: packed address, then both ports big-endian.
    pub fn encode(&self) -> [Vec<u8>; 3] {
        [
            self.address.octets().to_vec(),
            self.udp_port.to_be_bytes().to_vec(),
            self.tcp_port.to_be_bytes().to_vec(),
        ]
    }

    /// Rebuild an endpoint from its field triple.
    ///
    /// # Errors
    ///
    /// - `MalformedAddress` if the address is not 4 or 16 bytes
    /// - `MalformedPort` if either port is not exactly 2 bytes
    pub fn decode(fields: [&[u8]; 3]) -> Result<Self, PingError> {
        let [address, udp_port, tcp_port] = fields;
        Ok(Self {
            address: IpAddr::from_octets(address)?,
            udp_port: decode_port(udp_port)?,
            tcp_port: decode_port(tcp_port)?,
        })
    }

    /// Decode an endpoint from an RLP list item.
    ///
    /// Items after the third are ignored for forward compatibility.
    pub fn decode_rlp(rlp: &Rlp<'_>) -> Result<Self, PingError> {
        if !rlp.is_list() {
            return Err(PingError::MalformedPayload(
                "endpoint must be a list".to_string(),
            ));
        }
        let count = rlp.item_count()?;
        if count < 3 {
            return Err(PingError::MalformedPayload(format!(
                "endpoint needs 3 items, got {}",
                count
            )));
        }

        let address = rlp.at(0)?;
        let udp_port = rlp.at(1)?;
        let tcp_port = rlp.at(2)?;
        Self::decode([
            data_field(&address)?,
            data_field(&udp_port)?,
            data_field(&tcp_port)?,
        ])
    }

    /// UDP socket address for sending discovery packets to this endpoint.
    pub fn udp_socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::new(self.address.into(), self.udp_port)
    }
}

impl Encodable for Endpoint {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        for field in self.encode() {
            s.append(&field);
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}/tcp{}", self.address, self.udp_port, self.tcp_port)
    }
}

/// Parse a fixed-width big-endian port.
fn decode_port(bytes: &[u8]) -> Result<u16, PingError> {
    let fixed: [u8; PORT_SIZE] = bytes
        .try_into()
        .map_err(|_| PingError::MalformedPort {
            length: bytes.len(),
        })?;
    Ok(u16::from_be_bytes(fixed))
}

/// Borrow the raw bytes of a string item, rejecting nested lists.
fn data_field<'a>(item: &Rlp<'a>) -> Result<&'a [u8], PingError> {
    if !item.is_data() {
        return Err(PingError::MalformedPayload(
            "endpoint field must be a byte string".to_string(),
        ));
    }
    Ok(item.data()?)
}
