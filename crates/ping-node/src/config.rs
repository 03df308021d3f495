//! Startup configuration: config provider and node key from the environment.

use anyhow::{bail, Context, Result};
use disc_crypto::Secp256k1KeyPair;
use disc_ping::{ConfigProvider, Endpoint, IpAddr, StaticConfigProvider, TomlConfigProvider};
use tracing::{info, warn};

/// Path to a TOML config file.
pub const CONFIG_ENV: &str = "PING_NODE_CONFIG";

/// Hex-encoded 32-byte private key.
pub const KEY_ENV: &str = "PING_NODE_KEY";

/// Load the config provider.
///
/// Uses `PING_NODE_CONFIG` when set. Otherwise advertises
/// 192.168.1.192:30303 and pings 127.0.0.1:30303.
pub fn load_config() -> Result<Box<dyn ConfigProvider>> {
    load_config_from(std::env::var(CONFIG_ENV).ok())
}

pub(crate) fn load_config_from(path: Option<String>) -> Result<Box<dyn ConfigProvider>> {
    match path {
        Some(path) => {
            let provider = TomlConfigProvider::load(&path)
                .with_context(|| format!("Failed to load config from {}", path))?;
            info!(%path, "Loaded configuration file");
            Ok(Box::new(provider))
        }
        None => {
            info!("No {} set, using built-in defaults", CONFIG_ENV);
            Ok(Box::new(default_config()))
        }
    }
}

fn default_config() -> StaticConfigProvider {
    StaticConfigProvider::new()
        .with_local_endpoint(Endpoint::new(IpAddr::v4(192, 168, 1, 192), 30303, 30303))
        .with_targets(vec![Endpoint::new(IpAddr::v4(127, 0, 0, 1), 30303, 30303)])
}

/// Load the node key from `PING_NODE_KEY`, or generate an ephemeral one.
pub fn load_key() -> Result<Secp256k1KeyPair> {
    load_key_from(std::env::var(KEY_ENV).ok())
}

pub(crate) fn load_key_from(secret_hex: Option<String>) -> Result<Secp256k1KeyPair> {
    match secret_hex {
        Some(secret_hex) => {
            let trimmed = secret_hex.trim().trim_start_matches("0x");
            if trimmed.len() != 64 {
                bail!("{} must be 32 bytes (64 hex chars)", KEY_ENV);
            }
            let key = Secp256k1KeyPair::from_hex(trimmed)
                .with_context(|| format!("{} is not a valid secp256k1 key", KEY_ENV))?;
            info!("Loaded node key from environment");
            Ok(key)
        }
        None => {
            warn!("No {} set, generating an ephemeral node key", KEY_ENV);
            Ok(Secp256k1KeyPair::generate())
        }
    }
}
