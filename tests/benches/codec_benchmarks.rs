//! # Disc-Ping Codec Benchmarks
//!
//! | Operation | Dominant cost |
//! |-----------|---------------|
//! | payload serialize / decode | RLP |
//! | seal | 1 ECDSA sign + 2 Keccak |
//! | open | 2 Keccak + 1 key recovery |
//! | open (tampered) | 1 Keccak, rejected before recovery |

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use disc_crypto::{keccak256, Secp256k1KeyPair};
use disc_ping::{Endpoint, Envelope, IpAddr, PacketType, PingMessage};
use rand::Rng;
use std::time::Duration;

fn sample_ping() -> PingMessage {
    PingMessage {
        version: 4,
        from: Endpoint::new(IpAddr::v4(192, 168, 1, 192), 30303, 30303),
        to: Endpoint::new(IpAddr::v4(127, 0, 0, 1), 30303, 30303),
        expiration: 1_700_000_060,
    }
}

fn bench_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("ping-payload");
    let ping = sample_ping();
    let payload = ping.serialize();

    group.bench_function("serialize", |b| b.iter(|| black_box(ping.serialize())));
    group.bench_function("decode", |b| {
        b.iter(|| black_box(PingMessage::decode(black_box(&payload)).is_ok()))
    });
    group.finish();
}

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("ping-envelope");
    group.measurement_time(Duration::from_secs(10));

    let key = Secp256k1KeyPair::generate();
    let payload = sample_ping().serialize();
    let wire = Envelope::seal(PacketType::PING, payload.clone(), &key)
        .unwrap()
        .to_wire();

    group.throughput(Throughput::Bytes(wire.len() as u64));
    group.bench_function("seal", |b| {
        b.iter(|| black_box(Envelope::seal(PacketType::PING, payload.clone(), &key).is_ok()))
    });
    group.bench_function("open", |b| {
        b.iter(|| black_box(Envelope::open(black_box(&wire)).is_ok()))
    });

    let mut tampered = wire.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;
    group.bench_function("open_tampered", |b| {
        b.iter(|| black_box(Envelope::open(black_box(&tampered)).is_err()))
    });
    group.finish();
}

fn bench_garbage(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let datagrams: Vec<Vec<u8>> = (0..256)
        .map(|_| {
            let len = rng.gen_range(0..1300);
            (0..len).map(|_| rng.gen()).collect()
        })
        .collect();

    c.bench_function("open_random_datagrams", |b| {
        b.iter(|| {
            for datagram in &datagrams {
                black_box(Envelope::open(datagram).is_err());
            }
        })
    });
}

fn bench_keccak(c: &mut Criterion) {
    let data = vec![0xABu8; 1280];
    c.bench_function("keccak256_1280", |b| b.iter(|| black_box(keccak256(&data))));
}

criterion_group!(benches, bench_payload, bench_envelope, bench_garbage, bench_keccak);
criterion_main!(benches);
