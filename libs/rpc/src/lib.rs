//! Protobuf messages and gRPC stubs for the task service.
//!
//! Everything under `generated/` is produced from `proto/tasks/v1/tasks.proto`
//! with prost + tonic and checked in. Do not edit it by hand.

pub mod tasks {
    pub mod v1 {
        include!("generated/tasks/v1/tasks.v1.rs");
    }
}
