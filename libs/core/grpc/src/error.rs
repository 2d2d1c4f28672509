use thiserror::Error;

pub type GrpcResult<T> = Result<T, GrpcError>;

/// Errors that can occur while building a gRPC channel
#[derive(Error, Debug)]
pub enum GrpcError {
  /// Target is not a valid URI
  #[error("Invalid URI: {0}")]
  InvalidUri(#[from] tonic::transport::Error),

  /// Failed to establish connection
  #[error("Connection to {target} failed: {source}")]
  ConnectionFailed {
    target: String,
    #[source]
    source: tonic::transport::Error,
  },
}
