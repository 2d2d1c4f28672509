//! Shared test infrastructure.
//!
//! - `TestDatabase`: PostgreSQL container with the task schema applied
//!   (feature: "postgres")
//! - `TestDataBuilder`: deterministic, per-test unique values
//!
//! Container-backed tests need Docker and are marked `#[ignore]`; run them
//! with `cargo test -- --ignored`.
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let data = TestDataBuilder::from_test_name("my_postgres_test");
//!     let title = data.title("first");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Deterministic test values derived from the test name.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of `name`, so reruns produce the same values.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A task title unique to this builder, e.g. `task-1234-first`.
    pub fn title(&self, suffix: &str) -> String {
        format!("task-{}-{}", self.seed, suffix)
    }
}
