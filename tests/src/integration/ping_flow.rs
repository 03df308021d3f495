//! # Ping Flow
//!
//! The full send/receive path through the public API only:
//! `PingService::seal_ping` on one node, `PingService::receive_ping` on another.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use disc_crypto::{keccak256, NodePublicKey, Secp256k1KeyPair};
    use disc_ping::{
        ControllableTimeSource, Endpoint, Envelope, FixedTimeSource, IpAddr, PacketType,
        PingCodecApi, PingConfig, PingError, PingMessage, PingService, StaticKeyProvider,
        Timestamp,
    };

    const NOW: u64 = 1_700_000_000;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn my_endpoint() -> Endpoint {
        Endpoint::new(IpAddr::v4(192, 168, 1, 192), 30303, 30303)
    }

    fn their_endpoint() -> Endpoint {
        Endpoint::new(IpAddr::v4(127, 0, 0, 1), 30303, 30303)
    }

    fn node(key: Secp256k1KeyPair, clock: ControllableTimeSource) -> PingService {
        PingService::new(
            Arc::new(StaticKeyProvider::new(key)),
            Box::new(clock),
            PingConfig::default(),
        )
    }

    // =============================================================================
    // END-TO-END
    // =============================================================================

    #[test]
    fn test_endpoint_packing_matches_reference_bytes() {
        let [address, udp, tcp] = my_endpoint().encode();
        let packed: Vec<u8> = [address, udp, tcp].concat();

        assert_eq!(hex::encode_upper(packed), "C0A801C0765F765F");
    }

    #[test]
    fn test_ping_signs_and_verifies_with_identical_fields() {
        let clock = ControllableTimeSource::new(NOW);
        let alice_key = Secp256k1KeyPair::generate();
        let alice_public = alice_key.public_key();
        let alice = node(alice_key, clock.clone());
        let bob = node(Secp256k1KeyPair::generate(), clock.clone());

        let envelope = alice.seal_ping(my_endpoint(), their_endpoint()).unwrap();
        let received = bob.receive_ping(&envelope.to_wire()).unwrap();

        assert_eq!(received.sender, alice_public);
        assert_eq!(received.ping.version, 4);
        assert_eq!(received.ping.from, my_endpoint());
        assert_eq!(received.ping.to, their_endpoint());
        assert_eq!(u64::from(received.ping.expiration), NOW + 60);
    }

    #[test]
    fn test_ping_expires_61_seconds_later() {
        let clock = ControllableTimeSource::new(NOW);
        let alice = node(Secp256k1KeyPair::generate(), clock.clone());
        let bob = node(Secp256k1KeyPair::generate(), clock.clone());

        let wire = alice
            .seal_ping(my_endpoint(), their_endpoint())
            .unwrap()
            .to_wire();

        clock.advance(61);
        assert!(matches!(
            bob.receive_ping(&wire),
            Err(PingError::ExpiredMessage { .. })
        ));
    }

    #[test]
    fn test_ipv6_endpoints_survive_the_envelope() {
        let key = Secp256k1KeyPair::generate();
        let mut v6 = [0u8; 16];
        v6[15] = 1;
        let ping = PingMessage::build(
            4,
            Endpoint::new(IpAddr::v6(v6), 30303, 0),
            Endpoint::new(IpAddr::v6([0xfe; 16]), 1, 65535),
            Duration::from_secs(60),
            Timestamp::new(NOW),
        )
        .unwrap();

        let wire = Envelope::seal(PacketType::PING, ping.serialize(), &key)
            .unwrap()
            .to_wire();
        let opened = Envelope::open(&wire).unwrap();

        assert_eq!(PingMessage::decode(&opened.payload).unwrap(), ping);
    }

    #[test]
    fn test_node_id_is_keccak_of_public_key() {
        let key = Secp256k1KeyPair::generate();
        let public: NodePublicKey = key.public_key();
        assert_eq!(public.node_id(), keccak256(public.as_bytes()));
    }

    #[test]
    fn test_short_datagram_is_malformed() {
        let bob = PingService::new(
            Arc::new(StaticKeyProvider::new(Secp256k1KeyPair::generate())),
            Box::new(FixedTimeSource::new(NOW)),
            PingConfig::default(),
        );

        assert_eq!(
            bob.receive_ping(&[0u8; 90]),
            Err(PingError::MalformedEnvelope {
                length: 90,
                minimum: 98
            })
        );
    }

    #[test]
    fn test_relayed_datagram_keeps_original_sender() {
        // A relay can forward bytes but cannot re-attribute them
        let clock = ControllableTimeSource::new(NOW);
        let alice_key = Secp256k1KeyPair::generate();
        let alice_public = alice_key.public_key();
        let alice = node(alice_key, clock.clone());
        let relay = node(Secp256k1KeyPair::generate(), clock.clone());

        let wire = alice
            .seal_ping(my_endpoint(), their_endpoint())
            .unwrap()
            .to_wire();
        let relayed = relay.open(&wire).unwrap();

        assert_eq!(relayed.sender, alice_public);
        assert_ne!(Some(relayed.sender), relay.local_public_key());
    }
}
