//! # UDP Flow
//!
//! Two nodes on loopback, each a `PingServer` over `UdpTransport`, built
//! from config providers the way `ping-node` builds itself.

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use disc_crypto::Secp256k1KeyPair;
    use disc_ping::{
        ConfigProvider, Endpoint, InboundPing, PingConfig, PingServer, PingService,
        StaticConfigProvider, StaticKeyProvider, SystemTimeSource, TomlConfigProvider,
        UdpTransport,
    };
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    struct Node {
        server: PingServer<UdpTransport>,
        inbound: mpsc::Receiver<InboundPing>,
        addr: SocketAddr,
        key_public: disc_crypto::NodePublicKey,
    }

    fn endpoint_for(addr: SocketAddr) -> Endpoint {
        Endpoint::new(addr.ip().into(), addr.port(), addr.port())
    }

    async fn start_node(config: &dyn ConfigProvider) -> Node {
        let key = Secp256k1KeyPair::generate();
        let key_public = key.public_key();
        let service = Arc::new(PingService::new(
            Arc::new(StaticKeyProvider::new(key)),
            Box::new(SystemTimeSource::new()),
            config.get_ping_config(),
        ));

        let transport = UdpTransport::bind(config.get_bind_address()).await.unwrap();
        let addr = transport.local_addr().unwrap();
        let server = PingServer::new(service, Arc::new(transport), endpoint_for(addr));
        let (inbound, _task) = server.spawn_listener(16);

        Node {
            server,
            inbound,
            addr,
            key_public,
        }
    }

    fn loopback_config() -> StaticConfigProvider {
        StaticConfigProvider::new()
            .with_bind_address(SocketAddr::from(([127, 0, 0, 1], 0)))
            .with_config(PingConfig::default())
    }

    #[tokio::test]
    async fn test_two_nodes_ping_each_other() {
        let mut alice = start_node(&loopback_config()).await;
        let mut bob = start_node(&loopback_config()).await;

        alice.server.ping(&endpoint_for(bob.addr)).await.unwrap();
        bob.server.ping(&endpoint_for(alice.addr)).await.unwrap();

        let at_bob = timeout(Duration::from_secs(5), bob.inbound.recv())
            .await
            .unwrap()
            .unwrap();
        let at_alice = timeout(Duration::from_secs(5), alice.inbound.recv())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(at_bob.ping.sender, alice.key_public);
        assert_eq!(at_bob.source, alice.addr);
        assert_eq!(at_alice.ping.sender, bob.key_public);
        assert_eq!(at_alice.ping.ping.to, endpoint_for(alice.addr));
    }

    #[tokio::test]
    async fn test_node_from_toml_config() {
        let config = TomlConfigProvider::parse(
            r#"
            [node]
            bind = "127.0.0.1:0"

            [ping]
            version = 4
            validity_window_secs = 30
            "#,
        )
        .unwrap();

        let mut listener = start_node(&config).await;
        let sender = start_node(&config).await;

        sender.server.ping(&endpoint_for(listener.addr)).await.unwrap();

        let received = timeout(Duration::from_secs(5), listener.inbound.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(received.ping.ping.version, 4);
        assert_eq!(received.ping.sender, sender.key_public);
    }

    #[tokio::test]
    async fn test_self_ping_is_delivered() {
        // The original script pings its own port
        let mut node = start_node(&loopback_config()).await;
        let hash = node.server.ping(&endpoint_for(node.addr)).await.unwrap();

        let received = timeout(Duration::from_secs(5), node.inbound.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(received.ping.hash, hash);
        assert_eq!(received.ping.sender, node.key_public);
    }
}
