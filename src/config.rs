//! Article server configuration

use serde::{Deserialize, Serialize};

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// Article server configuration
///
/// Contains everything needed to bind the HTTP listener and prepare the store.
///
/// # Example
///
/// ```
/// use articles_rs::ServerConfig;
///
/// // All interfaces on port 8080, seeded with the sample article
/// let config = ServerConfig::default();
/// assert_eq!(config.addr(), "0.0.0.0:8080");
///
/// // Loopback on an ephemeral port, empty store
/// let config = ServerConfig::local(0);
/// assert!(!config.seed);
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "0.0.0.0")
    pub host: String,

    /// Port to bind (0 picks an ephemeral port)
    pub port: u16,

    /// Start with the sample article in the store
    #[serde(default)]
    pub seed: bool,
}

impl ServerConfig {
    /// Create a new server configuration with an empty store
    ///
    /// # Arguments
    ///
    /// * `host` - Interface to bind
    /// * `port` - Port to bind
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            seed: false,
        }
    }

    /// Create a configuration bound to the loopback interface
    pub fn local(port: u16) -> Self {
        Self::new("127.0.0.1", port)
    }

    /// Enable or disable the sample article at startup
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// `host:port` string suitable for address resolution
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", DEFAULT_PORT).with_seed(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let config = ServerConfig::new("example.com", 9000);
        assert_eq!(config.host, "example.com");
        assert_eq!(config.port, 9000);
        assert!(!config.seed);
    }

    #[test]
    fn test_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.seed);
    }

    #[test]
    fn test_local_helper() {
        let config = ServerConfig::local(0);
        assert_eq!(config.addr(), "127.0.0.1:0");
        assert!(!config.seed);
    }

    #[test]
    fn test_with_seed() {
        let config = ServerConfig::local(8081).with_seed(true);
        assert!(config.seed);
        assert_eq!(config.port, 8081);
    }

    #[test]
    fn test_deserialize_seed_defaults_false() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"host":"localhost","port":8080}"#).unwrap();
        assert_eq!(config, ServerConfig::new("localhost", 8080));
    }
}
