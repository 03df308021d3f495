use std::net::SocketAddr;

use crate::domain::{Endpoint, IpAddr, PingConfig};
use crate::ports::ConfigProvider;

/// Default discovery port.
pub const DEFAULT_PORT: u16 = 30303;

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
}

fn default_local_endpoint() -> Endpoint {
    Endpoint::new(IpAddr::v4(127, 0, 0, 1), DEFAULT_PORT, DEFAULT_PORT)
}

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider with hardcoded values.
///
/// Useful for testing and development. For production, use `TomlConfigProvider`.
#[derive(Debug, Clone)]
pub struct StaticConfigProvider {
    bind_address: SocketAddr,
    local_endpoint: Endpoint,
    targets: Vec<Endpoint>,
    config: PingConfig,
}

impl StaticConfigProvider {
    /// Create with default config, loopback endpoint and no targets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bind_address: default_bind_address(),
            local_endpoint: default_local_endpoint(),
            targets: Vec::new(),
            config: PingConfig::default(),
        }
    }

    /// Bind to the given socket address.
    #[must_use]
    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Advertise the given endpoint as `from`.
    #[must_use]
    pub fn with_local_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.local_endpoint = endpoint;
        self
    }

    /// Ping these endpoints at startup.
    #[must_use]
    pub fn with_targets(mut self, targets: Vec<Endpoint>) -> Self {
        self.targets = targets;
        self
    }

    /// Use the given ping parameters.
    #[must_use]
    pub fn with_config(mut self, config: PingConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for StaticConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn get_bind_address(&self) -> SocketAddr {
        self.bind_address
    }

    fn get_local_endpoint(&self) -> Endpoint {
        self.local_endpoint
    }

    fn get_ping_targets(&self) -> Vec<Endpoint> {
        self.targets.clone()
    }

    fn get_ping_config(&self) -> PingConfig {
        self.config.clone()
    }
}

// ============================================================================
// TomlConfigProvider - Production Config Loading (requires "network" feature)
// ============================================================================

#[cfg(feature = "network")]
mod toml_config {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;

    /// Configuration file structure.
    #[derive(Debug, Deserialize)]
    struct ConfigFile {
        #[serde(default)]
        node: NodeSection,
        #[serde(default)]
        endpoint: EndpointSection,
        #[serde(default)]
        ping: PingSection,
        #[serde(default)]
        targets: TargetsSection,
    }

    #[derive(Debug, Deserialize, Default)]
    struct NodeSection {
        bind: Option<String>,
    }

    #[derive(Debug, Deserialize, Default)]
    struct EndpointSection {
        address: Option<String>,
        udp_port: Option<u16>,
        tcp_port: Option<u16>,
    }

    #[derive(Debug, Deserialize, Default)]
    struct PingSection {
        version: Option<u8>,
        validity_window_secs: Option<u64>,
    }

    #[derive(Debug, Deserialize, Default)]
    struct TargetsSection {
        #[serde(default)]
        nodes: Vec<String>,
    }

    /// TOML-based configuration provider.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [node]
    /// bind = "0.0.0.0:30303"
    ///
    /// [endpoint]
    /// address = "192.168.1.192"
    /// udp_port = 30303
    /// tcp_port = 30303
    ///
    /// [ping]
    /// version = 4
    /// validity_window_secs = 60
    ///
    /// [targets]
    /// nodes = ["127.0.0.1:30303"]
    /// ```
    ///
    /// Every section is optional. Target entries that do not parse as a
    /// socket address are skipped.
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        inner: StaticConfigProvider,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if file cannot be read or parsed.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

            let bind_address = match file.node.bind {
                Some(bind) => bind
                    .parse::<SocketAddr>()
                    .map_err(|_| ConfigError::Invalid(format!("bind address {:?}", bind)))?,
                None => default_bind_address(),
            };

            let defaults = default_local_endpoint();
            let address = match file.endpoint.address {
                Some(address) => address
                    .parse::<std::net::IpAddr>()
                    .map(IpAddr::from)
                    .map_err(|_| ConfigError::Invalid(format!("endpoint address {:?}", address)))?,
                None => defaults.address,
            };
            let local_endpoint = Endpoint::new(
                address,
                file.endpoint.udp_port.unwrap_or(defaults.udp_port),
                file.endpoint.tcp_port.unwrap_or(defaults.tcp_port),
            );

            let targets = file
                .targets
                .nodes
                .iter()
                .filter_map(|node| Self::parse_target(node))
                .collect();

            let base = PingConfig::default();
            let config = PingConfig {
                version: file.ping.version.unwrap_or(base.version),
                validity_window: file
                    .ping
                    .validity_window_secs
                    .map(Duration::from_secs)
                    .unwrap_or(base.validity_window),
            };

            Ok(Self {
                inner: StaticConfigProvider::new()
                    .with_bind_address(bind_address)
                    .with_local_endpoint(local_endpoint)
                    .with_targets(targets)
                    .with_config(config),
            })
        }

        /// Parse "ip:port" into an endpoint using the port for UDP and TCP.
        fn parse_target(s: &str) -> Option<Endpoint> {
            let addr: SocketAddr = s.parse().ok()?;
            Some(Endpoint::new(addr.ip().into(), addr.port(), addr.port()))
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn get_bind_address(&self) -> SocketAddr {
            self.inner.get_bind_address()
        }

        fn get_local_endpoint(&self) -> Endpoint {
            self.inner.get_local_endpoint()
        }

        fn get_ping_targets(&self) -> Vec<Endpoint> {
            self.inner.get_ping_targets()
        }

        fn get_ping_config(&self) -> PingConfig {
            self.inner.get_ping_config()
        }
    }

    /// Errors that can occur during config loading.
    #[derive(Debug, Clone)]
    pub enum ConfigError {
        /// File I/O error.
        Io {
            /// Path of the file that failed to load.
            path: String,
            /// Error message from the I/O operation.
            error: String,
        },
        /// TOML parsing error.
        Parse(String),
        /// A value parsed but is not usable.
        Invalid(String),
    }

    impl std::fmt::Display for ConfigError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Io { path, error } => write!(f, "Failed to read {}: {}", path, error),
                Self::Parse(e) => write!(f, "Failed to parse config: {}", e),
                Self::Invalid(what) => write!(f, "Invalid {}", what),
            }
        }
    }

    impl std::error::Error for ConfigError {}
}

#[cfg(feature = "network")]
pub use toml_config::{ConfigError, TomlConfigProvider};
