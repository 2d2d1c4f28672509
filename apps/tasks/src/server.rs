//! Startup and shutdown of the task server
//!
//! Startup acquires resources in dependency order and registers a stop hook
//! for each one as soon as it exists:
//!
//! 1. PostgreSQL pool (connect with retry, then ping)
//! 2. Repository, domain service and gRPC handlers
//! 3. TCP listener
//! 4. Serve loop on its own task
//! 5. Health flips to `SERVING`
//!
//! Any failure before step 5 releases what was already acquired and aborts.
//! Shutdown runs the hooks newest first: drain the listener, then close the
//! pool.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use core_config::{ConfigError, Environment, FromEnv};
use database::DatabaseError;
use database::postgres::{DatabaseConnection, PostgresConfig};
use domain_tasks::{PgTaskRepository, TaskService};
use eyre::WrapErr;
use grpc_client::server::{GrpcServer, ServerConfig};
use rpc::tasks::v1::task_service_server::{SERVICE_NAME, TaskServiceServer};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codec::CompressionEncoding;
use tonic::transport::Server;
use tracing::{error, info, warn};

use crate::lifecycle::{BoxError, Lifecycle, LifecycleError};
use crate::service::TasksServiceImpl;

/// Everything the server reads from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: PostgresConfig,
}

impl FromEnv for AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            database: PostgresConfig::from_env()?,
        })
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("database unavailable: {0}")]
    Database(#[from] DatabaseError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("gRPC server failed: {0}")]
    Serve(#[from] Arc<tonic::transport::Error>),

    #[error("serve loop exited without reporting a result")]
    ServeLoopLost,
}

type ServeResult<E = tonic::transport::Error> = Result<(), Arc<E>>;

/// A server that is bound, serving and reporting healthy.
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    lifecycle: Lifecycle,
    exited: Option<oneshot::Receiver<ServeResult>>,
}

impl RunningServer {
    /// Address the listener actually bound, useful with port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Resolves when the serve loop stops on its own.
    ///
    /// Never resolves while the server is healthy. Call [`shutdown`] after
    /// it returns to release the remaining resources.
    ///
    /// [`shutdown`]: RunningServer::shutdown
    pub async fn wait(&mut self) -> Result<(), ServerError> {
        let Some(exited) = self.exited.as_mut() else {
            return Ok(());
        };
        let result = exited.await;
        self.exited = None;
        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ServerError::Serve(e)),
            Err(_) => Err(ServerError::ServeLoopLost),
        }
    }

    /// Drains in-flight calls, releases the listener, then closes the pool.
    ///
    /// Every step runs even if an earlier one fails; the first failure is
    /// returned.
    pub async fn shutdown(mut self) -> Result<(), LifecycleError> {
        info!(addr = %self.local_addr, "Shutting down");
        let result = self.lifecycle.stop().await;
        info!("Shutdown complete");
        result
    }
}

/// Connects to PostgreSQL and starts serving.
pub async fn start(config: AppConfig) -> Result<RunningServer, ServerError> {
    let db = database::postgres::connect_from_config_with_retry(config.database, None).await?;
    start_with_database(config.server, db).await
}

/// Starts serving on an already built pool.
///
/// The pool is owned from here on: it is closed on every failure path and
/// by [`RunningServer::shutdown`].
pub async fn start_with_database(
    config: ServerConfig,
    db: DatabaseConnection,
) -> Result<RunningServer, ServerError> {
    if let Err(e) = database::postgres::ping(&db).await {
        if let Err(close_err) = database::postgres::close(db).await {
            warn!(error = %close_err, "Failed to close pool after failed ping");
        }
        return Err(e.into());
    }

    let mut lifecycle = Lifecycle::new();
    let pool = db.clone();
    lifecycle.register("database", move || database::postgres::close(pool));

    let tasks = TasksServiceImpl::new(TaskService::new(PgTaskRepository::new(db)));
    let mut tasks = TaskServiceServer::new(tasks);
    if config.enable_compression {
        tasks = tasks
            .accept_compressed(CompressionEncoding::Zstd)
            .send_compressed(CompressionEncoding::Zstd);
    }

    let (health_reporter, health_service) = GrpcServer::health_service();
    GrpcServer::set_not_serving(&health_reporter, &[SERVICE_NAME]).await;

    let addr = config.addr_string();
    let (listener, local_addr) = match bind(&addr).await {
        Ok(bound) => bound,
        Err(source) => {
            if let Err(e) = lifecycle.stop().await {
                error!(error = %e, "Cleanup after failed bind also failed");
            }
            return Err(ServerError::Bind { addr, source });
        }
    };

    let (trigger, triggered) = oneshot::channel::<()>();
    let serve = Server::builder()
        .add_service(health_service)
        .add_service(tasks)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
            let _ = triggered.await;
        });
    let (serve_loop, exited) = spawn_serve_loop(serve);

    let reporter = health_reporter.clone();
    lifecycle.register("grpc listener", move || async move {
        GrpcServer::set_not_serving(&reporter, &[SERVICE_NAME]).await;
        let _ = trigger.send(());
        drain(serve_loop).await
    });

    GrpcServer::log_startup(&config, local_addr, SERVICE_NAME);
    GrpcServer::set_serving(&health_reporter, &[SERVICE_NAME]).await;

    Ok(RunningServer {
        local_addr,
        lifecycle,
        exited: Some(exited),
    })
}

/// Runs `serve` on its own task.
///
/// The outcome goes to the returned receiver for [`RunningServer::wait`] and
/// is also the task's output, so the stop hook sees a failure during drain.
fn spawn_serve_loop<F, E>(
    serve: F,
) -> (JoinHandle<ServeResult<E>>, oneshot::Receiver<ServeResult<E>>)
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let (exit_tx, exited) = oneshot::channel();
    let serve_loop = tokio::spawn(async move {
        let result = serve.await.map_err(Arc::new);
        if let Err(e) = &result {
            error!(error = %e, "gRPC serve loop failed");
        }
        let _ = exit_tx.send(result.clone());
        result
    });
    (serve_loop, exited)
}

/// Waits for the serve loop to finish and surfaces its failure.
async fn drain<E>(serve_loop: JoinHandle<ServeResult<E>>) -> Result<(), BoxError>
where
    E: std::error::Error + Send + Sync + 'static,
{
    serve_loop.await??;
    Ok(())
}

async fn bind(addr: &str) -> std::io::Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    Ok((listener, local_addr))
}

/// Runs the server until SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns an error if configuration is invalid, startup fails, the serve
/// loop dies, or a resource fails to release during shutdown.
pub async fn run() -> eyre::Result<()> {
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    let config = AppConfig::from_env().wrap_err("Failed to load configuration")?;
    let mut server = start(config).await.wrap_err("Failed to start task server")?;

    let served = tokio::select! {
        _ = shutdown_signal() => Ok(()),
        result = server.wait() => result,
    };

    let stopped = server.shutdown().await;
    served.wrap_err("gRPC server stopped unexpectedly")?;
    stopped.wrap_err("Shutdown did not complete cleanly")?;
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
