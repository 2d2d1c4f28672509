use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{CreateTask, Task};

/// Persistence capability the task service depends on.
///
/// Implementations report a missing row as [`TaskError::NotFound`] and every
/// other storage failure as [`TaskError::Database`]. They never log failures;
/// the service does that once when it classifies them.
///
/// [`TaskError::NotFound`]: crate::TaskError::NotFound
/// [`TaskError::Database`]: crate::TaskError::Database
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks, newest `created_at` first. An empty store is an empty vec.
    async fn fetch_all(&self) -> TaskResult<Vec<Task>>;

    /// Persist a new task and return it as stored.
    ///
    /// The title is assumed to be validated already.
    async fn insert(&self, input: CreateTask) -> TaskResult<Task>;

    async fn fetch_by_id(&self, id: &str) -> TaskResult<Task>;

    /// Unconditionally set `status` and refresh `updated_at`.
    async fn update_status(&self, id: &str, status: &str) -> TaskResult<Task>;

    /// Set `status` only if the row exists and does not already have it.
    ///
    /// Runs as a single conditional statement. Returns the row after the
    /// write, or `None` when nothing changed (missing id, or already in
    /// `status`).
    async fn transition_status(&self, id: &str, status: &str) -> TaskResult<Option<Task>>;
}
