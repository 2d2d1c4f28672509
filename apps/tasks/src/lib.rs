//! Tasks gRPC Service
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (gRPC, optional Zstd compression)
//! TasksServiceImpl (service.rs)
//!   ↓ (proto ↔ domain conversions)
//! TaskService (domain layer, error classification)
//!   ↓
//! PgTaskRepository (persistence)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Modules
//!
//! - `lifecycle`: ordered stop hooks
//! - `server`: startup, shutdown and signal handling
//! - `service`: gRPC handlers (TasksServiceImpl)

pub mod conversions;
pub mod lifecycle;
pub mod server;
pub mod service;

pub use lifecycle::{Lifecycle, LifecycleError};
pub use server::{AppConfig, RunningServer, ServerError, run, start, start_with_database};
pub use service::TasksServiceImpl;
