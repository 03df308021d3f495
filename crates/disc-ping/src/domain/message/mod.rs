//! # Ping Message
//!
//! Logical payload of a discovery Ping, serialized as the RLP list:
//!
//! ```text
//! [ version, from_endpoint, to_endpoint, expiration ]
//! ```
//!
//! Field order is part of the wire contract. `expiration` is an absolute
//! UNIX time in seconds, encoded as a minimal big-endian integer.

use std::time::Duration;

use rlp::{Rlp, RlpStream};

use crate::domain::{Endpoint, PacketType, PingError, Timestamp};

/// Number of fields a Ping payload must carry.
const PING_FIELD_COUNT: usize = 4;

/// A discovery Ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingMessage {
    /// Protocol revision.
    pub version: u8,
    /// Sender's advertised endpoint.
    pub from: Endpoint,
    /// Intended recipient's endpoint.
    pub to: Endpoint,
    /// Absolute UNIX seconds after which the Ping is stale.
    pub expiration: u32,
}

impl PingMessage {
    /// Tag this message is sealed under.
    pub const PACKET_TYPE: PacketType = PacketType::PING;

    /// Build a Ping expiring `validity_window` after `now`.
    ///
    /// The expiration is always derived from the clock; callers cannot pick
    /// an arbitrary absolute time.
    ///
    /// # Errors
    ///
    /// - `InvalidValidityWindow` if the window is under one second
    /// - `TimestampOutOfRange` if the expiration does not fit in u32
    pub fn build(
        version: u8,
        from: Endpoint,
        to: Endpoint,
        validity_window: Duration,
        now: Timestamp,
    ) -> Result<Self, PingError> {
        let window = validity_window.as_secs();
        if window == 0 {
            return Err(PingError::InvalidValidityWindow);
        }

        let expires_at = now.as_secs().saturating_add(window);
        let expiration =
            u32::try_from(expires_at).map_err(|_| PingError::TimestampOutOfRange(expires_at))?;

        Ok(Self {
            version,
            from,
            to,
            expiration,
        })
    }

    /// RLP-encode the payload.
    pub fn serialize(&self) -> Vec<u8> {
        let mut stream = RlpStream::new_list(PING_FIELD_COUNT);
        stream
            .append(&self.version)
            .append(&self.from)
            .append(&self.to)
            .append(&self.expiration);
        stream.out().to_vec()
    }

    /// Decode a Ping payload.
    ///
    /// List items after `expiration` are ignored, so newer protocol
    /// revisions that append fields still decode. Bytes after the list
    /// itself are not.
    pub fn decode(payload: &[u8]) -> Result<Self, PingError> {
        let rlp = Rlp::new(payload);
        if !rlp.is_list() {
            return Err(PingError::MalformedPayload(
                "ping payload must be a list".to_string(),
            ));
        }
        let info = rlp.payload_info()?;
        let list_len = info.header_len + info.value_len;
        if list_len != payload.len() {
            return Err(PingError::MalformedPayload(format!(
                "{} trailing bytes after ping list",
                payload.len().saturating_sub(list_len)
            )));
        }
        let count = rlp.item_count()?;
        if count < PING_FIELD_COUNT {
            return Err(PingError::MalformedPayload(format!(
                "ping needs {} items, got {}",
                PING_FIELD_COUNT, count
            )));
        }

        Ok(Self {
            version: rlp.val_at(0)?,
            from: Endpoint::decode_rlp(&rlp.at(1)?)?,
            to: Endpoint::decode_rlp(&rlp.at(2)?)?,
            expiration: rlp.val_at(3)?,
        })
    }

    /// A Ping is expired once `now` has passed its expiration second.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        u64::from(self.expiration) < now.as_secs()
    }

    /// Reject the Ping if it is expired at `now`.
    pub fn ensure_fresh(&self, now: Timestamp) -> Result<(), PingError> {
        if self.is_expired(now) {
            return Err(PingError::ExpiredMessage {
                expiration: self.expiration,
                now: now.as_secs(),
            });
        }
        Ok(())
    }
}
