use disc_crypto::NodePublicKey;
use tracing::debug;

use crate::domain::{
    Endpoint, Envelope, PacketType, PingError, PingMessage, VerifiedEnvelope,
};
use crate::ports::{PingCodecApi, ReceivedPing};
use crate::service::PingService;

impl PingCodecApi for PingService {
    fn build_ping(&self, from: Endpoint, to: Endpoint) -> Result<PingMessage, PingError> {
        PingMessage::build(
            self.config.version,
            from,
            to,
            self.config.validity_window,
            self.now(),
        )
    }

    fn seal_ping(&self, from: Endpoint, to: Endpoint) -> Result<Envelope, PingError> {
        let key = self.signing_key()?;
        let ping = self.build_ping(from, to)?;
        let envelope = Envelope::seal(PingMessage::PACKET_TYPE, ping.serialize(), &key)?;

        debug!(
            to = %ping.to,
            expiration = ping.expiration,
            hash = %hex::encode(&envelope.hash()[..4]),
            "sealed ping"
        );
        Ok(envelope)
    }

    fn open(&self, raw: &[u8]) -> Result<VerifiedEnvelope, PingError> {
        Envelope::open(raw).inspect_err(|err| {
            debug!(len = raw.len(), error = %err, "rejected datagram");
        })
    }

    fn receive_ping(&self, raw: &[u8]) -> Result<ReceivedPing, PingError> {
        let opened = self.open(raw)?;

        if opened.packet_type != PacketType::PING {
            debug!(packet_type = %opened.packet_type, "ignoring non-ping packet");
            return Err(PingError::UnexpectedPacketType {
                expected: PacketType::PING.as_byte(),
                actual: opened.packet_type.as_byte(),
            });
        }

        let ping = PingMessage::decode(&opened.payload).inspect_err(|err| {
            debug!(sender = %opened.sender, error = %err, "undecodable ping payload");
        })?;

        ping.ensure_fresh(self.now()).inspect_err(|err| {
            debug!(sender = %opened.sender, error = %err, "stale ping");
        })?;

        Ok(ReceivedPing {
            ping,
            sender: opened.sender,
            hash: opened.hash,
        })
    }

    fn local_public_key(&self) -> Option<NodePublicKey> {
        self.keys.public_key()
    }
}

