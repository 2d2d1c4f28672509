pub mod config;

pub use config::{ChannelConfig, ClientConfig};

use crate::error::{GrpcError, GrpcResult};
use tonic::transport::{Channel, Endpoint};

/// Connects to `addr` with the default [`ChannelConfig`].
pub async fn create_channel(addr: impl Into<String>) -> GrpcResult<Channel> {
  create_channel_with_config(addr, ChannelConfig::default()).await
}

/// Connects to `addr`, failing within `config.connect_timeout` when nothing
/// answers.
///
/// ## Example
/// ```ignore
/// use grpc_client::{create_channel_with_config, ChannelConfig};
/// use std::time::Duration;
///
/// let config = ChannelConfig::default().with_connect_timeout(Duration::from_secs(2));
/// let channel = create_channel_with_config("http://localhost:50051", config).await?;
/// ```
pub async fn create_channel_with_config(
  addr: impl Into<String>,
  config: ChannelConfig,
) -> GrpcResult<Channel> {
  let addr_string = addr.into();

  let endpoint = Endpoint::from_shared(addr_string.clone()).map_err(|e| {
    tracing::debug!(target: "grpc_client", addr = %addr_string, error = ?e, "Invalid URI");
    GrpcError::InvalidUri(e)
  })?;

  let endpoint = config.apply_to_endpoint(endpoint);

  tracing::debug!(target: "grpc_client", addr = %addr_string, "Creating gRPC channel");

  endpoint.connect().await.map_err(|e| {
    tracing::debug!(
      target: "grpc_client",
      addr = %addr_string,
      error = ?e,
      "Failed to connect to gRPC service"
    );
    GrpcError::ConnectionFailed {
      target: addr_string,
      source: e,
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::time::Duration;

  #[tokio::test]
  async fn test_invalid_uri() {
    let result = create_channel("not a valid uri").await;
    assert!(matches!(result, Err(GrpcError::InvalidUri(_))));
  }

  #[tokio::test]
  async fn test_connection_failed_names_target() {
    let config = ChannelConfig::new().with_connect_timeout(Duration::from_millis(500));
    let err = create_channel_with_config("http://127.0.0.1:1", config)
      .await
      .unwrap_err();

    assert!(matches!(err, GrpcError::ConnectionFailed { .. }));
    assert!(err.to_string().contains("127.0.0.1:1"));
  }
}
