use std::sync::Arc;

use disc_crypto::Secp256k1KeyPair;

use crate::ports::KeyProvider;

/// Key provider holding a single node key for the process lifetime.
///
/// The key is zeroized when the last `Arc` is dropped.
#[derive(Debug, Clone)]
pub struct StaticKeyProvider {
    key: Arc<Secp256k1KeyPair>,
}

impl StaticKeyProvider {
    /// Wrap an owned key.
    #[must_use]
    pub fn new(key: Secp256k1KeyPair) -> Self {
        Self { key: Arc::new(key) }
    }

    /// Share an existing key.
    #[must_use]
    pub fn from_shared(key: Arc<Secp256k1KeyPair>) -> Self {
        Self { key }
    }
}

impl KeyProvider for StaticKeyProvider {
    fn current_key(&self) -> Option<Arc<Secp256k1KeyPair>> {
        Some(Arc::clone(&self.key))
    }
}
