//! Server Configuration & State

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid BIND_ADDR {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Where to listen and what to serve
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding the compiled page (`index.html`, wasm, assets)
    pub static_dir: PathBuf,
}

impl ServerConfig {
    pub const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:3000";
    pub const DEFAULT_STATIC_DIR: &'static str = "static";

    /// Read `BIND_ADDR` and `STATIC_DIR`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::var("BIND_ADDR").ok(), std::env::var("STATIC_DIR").ok())
    }

    fn from_vars(bind_addr: Option<String>, static_dir: Option<String>) -> Result<Self, ConfigError> {
        let value = bind_addr.unwrap_or_else(|| Self::DEFAULT_BIND_ADDR.into());
        let bind_addr = value
            .parse()
            .map_err(|source| ConfigError::BindAddr { value, source })?;

        Ok(Self {
            bind_addr,
            static_dir: static_dir.unwrap_or_else(|| Self::DEFAULT_STATIC_DIR.into()).into(),
        })
    }

    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_vars(None, None).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.index_file(), PathBuf::from("static/index.html"));
    }

    #[test]
    fn test_bad_bind_addr() {
        let err = ServerConfig::from_vars(Some("localhost".into()), None).unwrap_err();
        assert!(err.to_string().contains("localhost"));
    }
}
