use std::sync::Arc;

use disc_crypto::Secp256k1KeyPair;

use crate::domain::{PingConfig, PingError, Timestamp};
use crate::ports::{KeyProvider, TimeSource};

/// Ping Service implementing the driving port.
///
/// Wraps a key provider, a time source and the ping parameters.
///
/// # Example
///
/// ```rust,ignore
/// use disc_ping::service::PingService;
/// use disc_ping::ports::PingCodecApi;
///
/// let keys = Arc::new(StaticKeyProvider::new(Secp256k1KeyPair::generate()));
/// let service = PingService::new(keys, Box::new(SystemTimeSource::new()), PingConfig::default());
///
/// let wire = service.seal_ping(my_endpoint, their_endpoint)?.to_wire();
/// ```
pub struct PingService {
    /// Source of the signing key
    pub(crate) keys: Arc<dyn KeyProvider>,
    /// Time source for expiration stamping and checks
    pub(crate) time_source: Box<dyn TimeSource>,
    /// Version and validity window for outgoing pings
    pub(crate) config: PingConfig,
}

impl PingService {
    /// Create a new ping service.
    ///
    /// # Arguments
    ///
    /// * `keys` - Provider of the node signing key
    /// * `time_source` - Provider for current time
    /// * `config` - Ping version and validity window
    pub fn new(
        keys: Arc<dyn KeyProvider>,
        time_source: Box<dyn TimeSource>,
        config: PingConfig,
    ) -> Self {
        Self {
            keys,
            time_source,
            config,
        }
    }

    /// Get the current timestamp from the time source.
    pub(crate) fn now(&self) -> Timestamp {
        self.time_source.now()
    }

    /// Fetch the signing key or fail with `KeyUnavailable`.
    pub(crate) fn signing_key(&self) -> Result<Arc<Secp256k1KeyPair>, PingError> {
        self.keys.current_key().ok_or(PingError::KeyUnavailable)
    }

    /// Ping parameters in use.
    pub fn config(&self) -> &PingConfig {
        &self.config
    }
}

impl std::fmt::Debug for PingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PingService")
            .field("config", &self.config)
            .field("public_key", &self.keys.public_key())
            .finish_non_exhaustive()
    }
}
