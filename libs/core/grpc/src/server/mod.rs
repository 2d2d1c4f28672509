//! gRPC server helpers
//!
//! ```ignore
//! use core_config::FromEnv;
//! use grpc_client::server::{GrpcServer, ServerConfig};
//! use rpc::tasks::v1::task_service_server::SERVICE_NAME;
//!
//! let config = ServerConfig::from_env()?;
//! let (health_reporter, health_service) = GrpcServer::health_service();
//!
//! GrpcServer::set_not_serving(&health_reporter, &[SERVICE_NAME]).await;
//! // bind, spawn serve loop...
//! GrpcServer::log_startup(&config, local_addr, SERVICE_NAME);
//! GrpcServer::set_serving(&health_reporter, &[SERVICE_NAME]).await;
//! ```

mod builder;
mod config;

pub use builder::GrpcServer;
pub use config::ServerConfig;
