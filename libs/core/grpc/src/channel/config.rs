use std::time::Duration;
use tonic::transport::Endpoint;

use core_config::{ConfigError, FromEnv, env_flag, env_or_default};

/// HTTP/2 and TCP settings applied to every client endpoint.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
  // HTTP/2 Keep-Alive
  pub http2_keep_alive_interval: Option<Duration>,
  pub keep_alive_timeout: Duration,
  pub keep_alive_while_idle: bool,

  // Connection settings
  pub connect_timeout: Duration,
  pub timeout: Duration,

  // Window sizes (HTTP/2 flow control)
  pub initial_connection_window_size: Option<u32>,
  pub initial_stream_window_size: Option<u32>,

  // TCP settings
  pub tcp_nodelay: bool,
}

impl Default for ChannelConfig {
  fn default() -> Self {
    Self {
      http2_keep_alive_interval: Some(Duration::from_secs(30)),
      keep_alive_timeout: Duration::from_secs(10),
      keep_alive_while_idle: false,
      connect_timeout: Duration::from_secs(5),
      timeout: Duration::from_secs(10),
      initial_connection_window_size: Some(1024 * 1024), // 1MB
      initial_stream_window_size: Some(1024 * 1024),     // 1MB
      tcp_nodelay: true,
    }
  }
}

impl ChannelConfig {
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the connection timeout
  pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
    self.connect_timeout = timeout;
    self
  }

  /// Set the transport-level timeout for individual RPCs
  pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Disable HTTP/2 keep-alive
  pub fn without_keep_alive(mut self) -> Self {
    self.http2_keep_alive_interval = None;
    self
  }

  pub(crate) fn apply_to_endpoint(self, mut endpoint: Endpoint) -> Endpoint {
    if let Some(interval) = self.http2_keep_alive_interval {
      endpoint = endpoint.http2_keep_alive_interval(interval);
    }
    endpoint = endpoint
      .keep_alive_timeout(self.keep_alive_timeout)
      .keep_alive_while_idle(self.keep_alive_while_idle)
      .connect_timeout(self.connect_timeout)
      .timeout(self.timeout);

    if let Some(size) = self.initial_connection_window_size {
      endpoint = endpoint.initial_connection_window_size(size);
    }
    if let Some(size) = self.initial_stream_window_size {
      endpoint = endpoint.initial_stream_window_size(size);
    }

    endpoint.tcp_nodelay(self.tcp_nodelay)
  }
}

/// Where and how the command line client talks to the server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Server URI (default: http://localhost:50051)
  pub target: String,
  /// Send and accept zstd (default: true)
  pub enable_compression: bool,
  /// Deadline for a single RPC (default: 10s)
  pub call_timeout: Duration,
  /// Deadline for a whole command, dial included (default: 15s)
  pub command_timeout: Duration,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      target: "http://localhost:50051".to_string(),
      enable_compression: true,
      call_timeout: Duration::from_secs(10),
      command_timeout: Duration::from_secs(15),
    }
  }
}

impl ClientConfig {
  pub fn with_target(mut self, target: impl Into<String>) -> Self {
    self.target = target.into();
    self
  }

  /// Channel settings matching this client's deadlines.
  pub fn channel(&self) -> ChannelConfig {
    ChannelConfig::new().with_request_timeout(self.call_timeout)
  }
}

impl FromEnv for ClientConfig {
  /// Reads `GRPC_CLIENT_TARGET` and `GRPC_COMPRESSION`.
  fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();
    Ok(Self {
      target: env_or_default("GRPC_CLIENT_TARGET", &defaults.target),
      enable_compression: env_flag("GRPC_COMPRESSION", defaults.enable_compression),
      ..defaults
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_channel_config() {
    let config = ChannelConfig::default();
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.initial_connection_window_size, Some(1024 * 1024));
    assert!(config.tcp_nodelay);
  }

  #[test]
  fn test_disable_keep_alive() {
    let config = ChannelConfig::new().without_keep_alive();
    assert_eq!(config.http2_keep_alive_interval, None);
  }

  #[test]
  fn test_client_config_from_env_defaults() {
    temp_env::with_vars_unset(["GRPC_CLIENT_TARGET", "GRPC_COMPRESSION"], || {
      let config = ClientConfig::from_env().unwrap();
      assert_eq!(config.target, "http://localhost:50051");
      assert!(config.enable_compression);
      assert_eq!(config.call_timeout, Duration::from_secs(10));
      assert_eq!(config.command_timeout, Duration::from_secs(15));
    });
  }

  #[test]
  fn test_client_config_from_env_overrides() {
    temp_env::with_vars(
      [
        ("GRPC_CLIENT_TARGET", Some("http://tasks:6000")),
        ("GRPC_COMPRESSION", Some("false")),
      ],
      || {
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.target, "http://tasks:6000");
        assert!(!config.enable_compression);
      },
    );
  }

  #[test]
  fn test_channel_follows_call_timeout() {
    let config = ClientConfig::default();
    assert_eq!(config.channel().timeout, config.call_timeout);
  }
}
