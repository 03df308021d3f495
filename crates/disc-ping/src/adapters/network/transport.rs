use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use disc_crypto::Hash;
use thiserror::Error;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::{Endpoint, PingError, MAX_PACKET_SIZE};
use crate::ports::{DatagramTransport, NetworkError, PingCodecApi, ReceivedPing};
use crate::service::PingService;

/// Receive failures in a row before the listener gives up.
pub(crate) const MAX_CONSECUTIVE_RECV_ERRORS: u32 = 8;

/// First pause after a receive failure; doubles up to `RECV_BACKOFF_MAX`.
const RECV_BACKOFF_BASE: Duration = Duration::from_millis(5);
const RECV_BACKOFF_MAX: Duration = Duration::from_millis(200);

// ============================================================================
// UdpTransport - Production UDP Socket
// ============================================================================

/// tokio UDP socket implementing the `DatagramTransport` port.
///
/// One envelope per datagram, no framing.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Bind a socket to `addr`.
    pub async fn bind(addr: SocketAddr) -> Result<Self, NetworkError> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self { socket })
    }

    /// Address the socket is actually bound to (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr, NetworkError> {
        Ok(self.socket.local_addr()?)
    }
}

#[async_trait]
impl DatagramTransport for UdpTransport {
    async fn send_to(&self, data: &[u8], target: SocketAddr) -> Result<(), NetworkError> {
        if data.len() > MAX_PACKET_SIZE {
            return Err(NetworkError::MessageTooLarge);
        }
        self.socket.send_to(data, target).await?;
        Ok(())
    }

    async fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), NetworkError> {
        Ok(self.socket.recv_from(buf).await?)
    }
}

// ============================================================================
// PingServer - Send pings, listen for pings
// ============================================================================

/// A Ping accepted by the listener, tagged with the datagram source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundPing {
    /// Socket address the datagram came from.
    pub source: SocketAddr,
    /// The verified, fresh Ping.
    pub ping: ReceivedPing,
}

/// Errors from `PingServer::ping`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServerError {
    /// Building or sealing failed.
    #[error("codec error: {0}")]
    Codec(#[from] PingError),
    /// The datagram could not be sent.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

/// Couples a `PingService` with a datagram transport.
///
/// The codec never sees the socket: the server reads datagrams, hands the
/// bytes to the service and forwards whatever passes on a channel.
pub struct PingServer<T: DatagramTransport> {
    service: Arc<PingService>,
    transport: Arc<T>,
    local_endpoint: Endpoint,
}

impl<T: DatagramTransport + 'static> PingServer<T> {
    /// Create a server advertising `local_endpoint` as the `from` field.
    pub fn new(service: Arc<PingService>, transport: Arc<T>, local_endpoint: Endpoint) -> Self {
        Self {
            service,
            transport,
            local_endpoint,
        }
    }

    /// Seal a Ping to `target` and send it to the target's UDP address.
    ///
    /// Returns the envelope hash, which a Pong would echo.
    pub async fn ping(&self, target: &Endpoint) -> Result<Hash, ServerError> {
        let envelope = self.service.seal_ping(self.local_endpoint, *target)?;
        let wire = envelope.to_wire();

        self.transport
            .send_to(&wire, target.udp_socket_addr())
            .await?;

        info!(target = %target, bytes = wire.len(), "sent ping");
        Ok(*envelope.hash())
    }

    /// Spawn a task that receives datagrams and forwards accepted Pings.
    ///
    /// Rejected datagrams are logged and dropped. Receive failures back off
    /// exponentially; after `MAX_CONSECUTIVE_RECV_ERRORS` in a row the task
    /// gives up. The task also ends when the returned receiver is dropped.
    pub fn spawn_listener(&self, capacity: usize) -> (mpsc::Receiver<InboundPing>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity);
        let service = Arc::clone(&self.service);
        let transport = Arc::clone(&self.transport);

        let handle = tokio::spawn(async move {
            // One spare byte so oversized datagrams are detected, not truncated
            let mut buf = vec![0u8; MAX_PACKET_SIZE + 1];
            let mut failures = 0u32;

            loop {
                let (len, source) = tokio::select! {
                    _ = tx.closed() => break,
                    received = transport.recv_from(&mut buf) => match received {
                        Ok(received) => {
                            failures = 0;
                            received
                        }
                        Err(err) => {
                            failures += 1;
                            if failures >= MAX_CONSECUTIVE_RECV_ERRORS {
                                error!(error = %err, failures, "receive keeps failing, stopping listener");
                                break;
                            }
                            let pause = recv_backoff(failures);
                            warn!(error = %err, failures, ?pause, "receive failed");
                            tokio::select! {
                                _ = tx.closed() => break,
                                _ = tokio::time::sleep(pause) => continue,
                            }
                        }
                    },
                };

                match service.receive_ping(&buf[..len]) {
                    Ok(ping) => {
                        debug!(%source, sender = %ping.sender, "accepted ping");
                        if tx.send(InboundPing { source, ping }).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        debug!(%source, len, error = %err, "dropped datagram");
                    }
                }
            }

            debug!("ping listener stopped");
        });

        (rx, handle)
    }

    /// The service used for sealing and checking.
    pub fn service(&self) -> &Arc<PingService> {
        &self.service
    }
}

/// Pause after the `failures`-th receive error in a row.
fn recv_backoff(failures: u32) -> Duration {
    let factor = 1u32 << failures.saturating_sub(1).min(16);
    RECV_BACKOFF_BASE.saturating_mul(factor).min(RECV_BACKOFF_MAX)
}
