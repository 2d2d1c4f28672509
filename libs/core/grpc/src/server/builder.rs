//! Health reporting and startup logging.

use std::net::SocketAddr;

use super::config::ServerConfig;
use tonic_health::ServingStatus;
use tonic_health::pb::health_server::{Health, HealthServer};
use tonic_health::server::HealthReporter;
use tracing::info;

/// Helpers shared by gRPC servers.
pub struct GrpcServer;

impl GrpcServer {
    /// Reporter and `grpc.health.v1.Health` service pair.
    pub fn health_service() -> (HealthReporter, HealthServer<impl Health>) {
        tonic_health::server::health_reporter()
    }

    /// Log server startup information.
    pub fn log_startup(config: &ServerConfig, local_addr: SocketAddr, service_name: &str) {
        info!(
            addr = %local_addr,
            service = service_name,
            compression = config.enable_compression,
            "gRPC server listening"
        );
    }

    /// Marks each service and the empty name (used by generic probes) as serving.
    pub async fn set_serving(health_reporter: &HealthReporter, service_names: &[&str]) {
        Self::set_status(health_reporter, service_names, ServingStatus::Serving).await;
    }

    /// Marks each service and the empty name as not serving.
    pub async fn set_not_serving(health_reporter: &HealthReporter, service_names: &[&str]) {
        Self::set_status(health_reporter, service_names, ServingStatus::NotServing).await;
    }

    async fn set_status(
        health_reporter: &HealthReporter,
        service_names: &[&str],
        status: ServingStatus,
    ) {
        for service_name in service_names {
            health_reporter
                .set_service_status(*service_name, status)
                .await;
        }
        health_reporter.set_service_status("", status).await;

        info!(services = ?service_names, ?status, "Health status updated");
    }
}
