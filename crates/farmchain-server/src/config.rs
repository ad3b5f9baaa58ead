use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Upper bound for request bodies (record payloads are small).
    pub max_body_bytes: usize,
    /// Permissive CORS for consumer scan pages served from elsewhere.
    pub allow_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8642".parse().expect("static addr"),
            max_body_bytes: 64 * 1024,
            allow_cors: true,
        }
    }
}

impl ServerConfig {
    /// Load a config from a TOML file; missing keys fall back to defaults.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8642".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_body_bytes, 64 * 1024);
        assert!(c.allow_cors);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let c: ServerConfig = toml::from_str("bind_addr = \"0.0.0.0:9000\"").unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_body_bytes, ServerConfig::default().max_body_bytes);
    }
}
