//! # gRPC Plumbing
//!
//! Shared gRPC setup for the task server and its command line client.
//!
//! - **Server**: `ServerConfig` (`GRPC_HOST`, `GRPC_PORT`, `GRPC_COMPRESSION`)
//!   and health reporting helpers for `grpc.health.v1.Health`
//! - **Client**: `ClientConfig` (`GRPC_CLIENT_TARGET`) and channel creation
//!   with HTTP/2 tuning
//!
//! ## Quick Start
//!
//! ```ignore
//! use core_config::FromEnv;
//! use grpc_client::{ClientConfig, create_channel_with_config};
//! use rpc::tasks::v1::task_service_client::TaskServiceClient;
//!
//! let config = ClientConfig::from_env()?;
//! let channel = create_channel_with_config(&config.target, config.channel()).await?;
//! let client = TaskServiceClient::new(channel);
//! ```

pub mod channel;
pub mod error;
pub mod server;

pub use channel::{ChannelConfig, ClientConfig, create_channel, create_channel_with_config};
pub use error::{GrpcError, GrpcResult};
pub use server::{GrpcServer, ServerConfig};
