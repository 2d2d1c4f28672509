//! Server configuration loaded from environment variables.

use core_config::{ConfigError, FromEnv, env_flag, env_or_default, env_parse_or_default};

/// Configuration for the gRPC listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
    /// Port to listen on (default: 50051, 0 picks a free port)
    pub port: u16,
    /// Enable Zstd compression (default: true)
    pub enable_compression: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 50051,
            enable_compression: true,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_compression(mut self, enable: bool) -> Self {
        self.enable_compression = enable;
        self
    }

    /// `host:port`, suitable for `TcpListener::bind`.
    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads `GRPC_HOST`, `GRPC_PORT` and `GRPC_COMPRESSION`.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or_default("GRPC_HOST", "0.0.0.0"),
            port: env_parse_or_default("GRPC_PORT", "50051")?,
            enable_compression: env_flag("GRPC_COMPRESSION", true),
        })
    }
}
