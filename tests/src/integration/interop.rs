//! # Interop
//!
//! Cross-checks the codec against independent implementations:
//! libsecp256k1 (via the `secp256k1` crate) for signatures and recovery,
//! `sha3::Keccak256` for hashing and a hand-built `rlp::RlpStream` payload.

#[cfg(test)]
mod tests {
    use disc_crypto::{keccak256, Secp256k1KeyPair};
    use disc_ping::{Endpoint, Envelope, IpAddr, PacketType, PingMessage};
    use rlp::RlpStream;
    use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
    use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
    use sha3::{Digest, Keccak256};

    const SECRET: [u8; 32] = [0x42; 32];

    fn sample_ping() -> PingMessage {
        PingMessage {
            version: 4,
            from: Endpoint::new(IpAddr::v4(192, 168, 1, 192), 30303, 30303),
            to: Endpoint::new(IpAddr::v4(127, 0, 0, 1), 30303, 30303),
            expiration: 1_700_000_060,
        }
    }

    const CURVE_ORDER_HEX: &str =
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

    /// Big-endian `a - b` for 32-byte values with `a >= b`.
    fn sub_be(a: &[u8], b: &[u8]) -> [u8; 32] {
        let mut out = [0u8; 32];
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let mut diff = i16::from(a[i]) - i16::from(b[i]) - borrow;
            borrow = 0;
            if diff < 0 {
                diff += 256;
                borrow = 1;
            }
            out[i] = diff as u8;
        }
        out
    }

    fn libsecp_public(secret: &[u8; 32]) -> [u8; 64] {
        let secp = Secp256k1::new();
        let sk = SecretKey::from_slice(secret).unwrap();
        let pk = PublicKey::from_secret_key(&secp, &sk);
        let mut out = [0u8; 64];
        out.copy_from_slice(&pk.serialize_uncompressed()[1..]);
        out
    }

    // =============================================================================
    // SIGNATURES
    // =============================================================================

    #[test]
    fn test_libsecp_recovers_same_key_from_our_signature() {
        let key = Secp256k1KeyPair::from_bytes(SECRET).unwrap();
        let wire = Envelope::seal(PacketType::PING, sample_ping().serialize(), &key)
            .unwrap()
            .to_wire();

        let digest = keccak256(&wire[97..]);
        let rid = RecoveryId::from_i32(i32::from(wire[96])).unwrap();
        let sig = RecoverableSignature::from_compact(&wire[32..96], rid).unwrap();

        let secp = Secp256k1::verification_only();
        let recovered = secp
            .recover_ecdsa(&Message::from_digest(digest), &sig)
            .unwrap();

        assert_eq!(
            &recovered.serialize_uncompressed()[1..],
            key.public_key().as_bytes().as_slice()
        );
        assert_eq!(key.public_key().as_bytes(), &libsecp_public(&SECRET));
    }

    #[test]
    fn test_we_recover_libsecp_signer() {
        let secp = Secp256k1::new();
        let sk = SecretKey::from_slice(&SECRET).unwrap();
        let payload = sample_ping().serialize();

        let mut signed = vec![PacketType::PING.as_byte()];
        signed.extend_from_slice(&payload);
        let msg = Message::from_digest(keccak256(&signed));
        let (rid, compact) = secp.sign_ecdsa_recoverable(&msg, &sk).serialize_compact();

        let mut body = compact.to_vec();
        body.push(rid.to_i32() as u8);
        body.extend_from_slice(&signed);
        let mut wire = keccak256(&body).to_vec();
        wire.extend_from_slice(&body);

        let opened = Envelope::open(&wire).unwrap();
        assert_eq!(opened.sender.as_bytes(), &libsecp_public(&SECRET));
        assert_eq!(PingMessage::decode(&opened.payload).unwrap(), sample_ping());
    }

    #[test]
    fn test_deterministic_signatures_match_libsecp() {
        // Both sides use RFC 6979 nonces with low-s normalization
        let key = Secp256k1KeyPair::from_bytes(SECRET).unwrap();
        let digest = keccak256(b"discovery");

        let ours = key.sign_recoverable(&digest).unwrap();

        let secp = Secp256k1::new();
        let sk = SecretKey::from_slice(&SECRET).unwrap();
        let (rid, compact) = secp
            .sign_ecdsa_recoverable(&Message::from_digest(digest), &sk)
            .serialize_compact();

        assert_eq!(&ours.as_bytes()[..64], compact.as_slice());
        assert_eq!(i32::from(ours.recovery_byte()), rid.to_i32());
    }

    #[test]
    fn test_recovery_over_random_keys() {
        let secp = Secp256k1::verification_only();
        for i in 0..16u8 {
            let key = Secp256k1KeyPair::generate();
            let digest = keccak256(&[i]);
            let sig = key.sign_recoverable(&digest).unwrap();

            let rid = RecoveryId::from_i32(i32::from(sig.recovery_byte())).unwrap();
            let theirs = RecoverableSignature::from_compact(&sig.as_bytes()[..64], rid).unwrap();
            let recovered = secp
                .recover_ecdsa(&Message::from_digest(digest), &theirs)
                .unwrap();

            assert_eq!(
                &recovered.serialize_uncompressed()[1..],
                key.public_key().as_bytes().as_slice()
            );
        }
    }

    #[test]
    fn test_high_s_envelope_opens_like_libsecp() {
        let key = Secp256k1KeyPair::from_bytes(SECRET).unwrap();
        let mut wire = Envelope::seal(PacketType::PING, sample_ping().serialize(), &key)
            .unwrap()
            .to_wire();

        // Swap s for n - s and flip the parity bit, then refresh the outer hash
        let order = hex::decode(CURVE_ORDER_HEX).unwrap();
        let high_s = sub_be(&order, &wire[64..96]);
        wire[64..96].copy_from_slice(&high_s);
        wire[96] ^= 1;
        let outer = keccak256(&wire[32..]);
        wire[..32].copy_from_slice(&outer);

        let digest = keccak256(&wire[97..]);
        let rid = RecoveryId::from_i32(i32::from(wire[96])).unwrap();
        let theirs = RecoverableSignature::from_compact(&wire[32..96], rid).unwrap();
        let recovered = Secp256k1::verification_only()
            .recover_ecdsa(&Message::from_digest(digest), &theirs)
            .unwrap();
        assert_eq!(&recovered.serialize_uncompressed()[1..], &libsecp_public(&SECRET));

        let opened = Envelope::open(&wire).unwrap();
        assert_eq!(opened.sender, key.public_key());
    }

    // =============================================================================
    // HASHING AND PAYLOAD
    // =============================================================================

    #[test]
    fn test_outer_hash_matches_sha3_crate() {
        let key = Secp256k1KeyPair::from_bytes(SECRET).unwrap();
        let wire = Envelope::seal(PacketType::PING, sample_ping().serialize(), &key)
            .unwrap()
            .to_wire();

        let expected: [u8; 32] = Keccak256::digest(&wire[32..]).into();
        assert_eq!(&wire[..32], &expected);
    }

    #[test]
    fn test_payload_matches_hand_built_rlp() {
        let ping = sample_ping();

        let mut stream = RlpStream::new_list(4);
        stream.append(&4u8);
        stream.begin_list(3);
        stream.append(&vec![192u8, 168, 1, 192]);
        stream.append(&vec![0x76u8, 0x5f]);
        stream.append(&vec![0x76u8, 0x5f]);
        stream.begin_list(3);
        stream.append(&vec![127u8, 0, 0, 1]);
        stream.append(&vec![0x76u8, 0x5f]);
        stream.append(&vec![0x76u8, 0x5f]);
        stream.append(&ping.expiration);

        assert_eq!(ping.serialize(), stream.out().to_vec());
    }
}
