//! # Ping Node
//!
//! Binds a UDP socket, logs every valid Ping it receives and sends a signed
//! Ping to each configured target.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (`PING_NODE_CONFIG` or built-in defaults)
//! 3. Load the node key (`PING_NODE_KEY` or ephemeral)
//! 4. Bind the socket and spawn the listener
//! 5. Ping every target
//! 6. Run until Ctrl+C

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use disc_ping::{
    ConfigProvider, InboundPing, PingServer, PingService, StaticKeyProvider, SystemTimeSource,
    UdpTransport,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Inbound channel depth.
const INBOUND_CAPACITY: usize = 64;

/// The running node: a ping server plus its listener task.
struct PingNode {
    server: PingServer<UdpTransport>,
    config: Box<dyn ConfigProvider>,
    listener: JoinHandle<()>,
    logger: JoinHandle<()>,
}

impl PingNode {
    /// Bind the socket, wire the service and start listening.
    async fn start(config: Box<dyn ConfigProvider>) -> Result<Self> {
        let key = config::load_key()?;
        info!(node_id = %key.public_key(), "Node identity");

        let service = Arc::new(PingService::new(
            Arc::new(StaticKeyProvider::new(key)),
            Box::new(SystemTimeSource::new()),
            config.get_ping_config(),
        ));

        let bind = config.get_bind_address();
        let transport = UdpTransport::bind(bind)
            .await
            .with_context(|| format!("Failed to bind UDP socket on {}", bind))?;
        info!(addr = %transport.local_addr()?, "Listening for pings");

        let server = PingServer::new(service, Arc::new(transport), config.get_local_endpoint());
        let (inbound, listener) = server.spawn_listener(INBOUND_CAPACITY);
        let logger = tokio::spawn(log_inbound(inbound));

        Ok(Self {
            server,
            config,
            listener,
            logger,
        })
    }

    /// Send one Ping to every configured target.
    async fn ping_targets(&self) {
        for target in self.config.get_ping_targets() {
            match self.server.ping(&target).await {
                Ok(hash) => info!(%target, hash = %hex::encode(&hash[..8]), "Ping sent"),
                Err(err) => error!(%target, error = %err, "Ping failed"),
            }
        }
    }

    async fn shutdown(self) {
        self.listener.abort();
        self.logger.abort();
        info!("Node stopped");
    }
}

async fn log_inbound(mut inbound: mpsc::Receiver<InboundPing>) {
    while let Some(InboundPing { source, ping }) = inbound.recv().await {
        info!(
            %source,
            sender = %ping.sender,
            version = ping.ping.version,
            from = %ping.ping.from,
            to = %ping.ping.to,
            expiration = ping.ping.expiration,
            "Received ping"
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = config::load_config()?;
    let node = PingNode::start(config).await?;
    node.ping_targets().await;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    node.shutdown().await;
    Ok(())
}
