use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, STATUS_COMPLETED, Task};
use crate::repository::TaskRepository;

/// Business rules for tasks.
///
/// This is the only layer that decides which [`TaskError`] a caller sees.
/// Storage failures are logged here, once, and replaced by a short
/// `Internal` summary.
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Every task, newest first.
    #[instrument(skip(self))]
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository
            .fetch_all()
            .await
            .map_err(|e| internal(e, "failed to fetch tasks"))
    }

    /// Create a task. An empty status becomes "pending".
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn add_task(&self, input: CreateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|_| TaskError::Validation("title cannot be empty".to_string()))?;

        let task = self
            .repository
            .insert(input.with_default_status())
            .await
            .map_err(|e| internal(e, "failed to add task"))?;

        info!(task_id = %task.id, "Task added");
        Ok(task)
    }

    /// Move a task to "completed".
    ///
    /// The write is a single conditional update, so of several concurrent
    /// callers exactly one succeeds and the rest see `AlreadyCompleted`.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn complete_task(&self, id: &str) -> TaskResult<Task> {
        if id.is_empty() {
            return Err(TaskError::Validation("task_id cannot be empty".to_string()));
        }

        match self
            .repository
            .transition_status(id, STATUS_COMPLETED)
            .await
        {
            Ok(Some(task)) => {
                info!("Task completed");
                Ok(task)
            }
            Ok(None) => Err(self.explain_unchanged(id).await),
            Err(e) => Err(internal(e, "failed to complete task")),
        }
    }

    /// Why a conditional completion changed nothing: missing, or already done.
    async fn explain_unchanged(&self, id: &str) -> TaskError {
        match self.repository.fetch_by_id(id).await {
            Ok(task) if task.is_completed() => {
                info!("Task already completed");
                TaskError::AlreadyCompleted(id.to_string())
            }
            Ok(task) => internal(
                TaskError::Database(format!(
                    "conditional update skipped task in status '{}'",
                    task.status
                )),
                "failed to complete task",
            ),
            Err(TaskError::NotFound(_)) => {
                warn!("Task not found");
                TaskError::NotFound(id.to_string())
            }
            Err(e) => internal(e, "failed to complete task"),
        }
    }
}

/// Classify an adapter failure. `NotFound` passes through untouched.
fn internal(err: TaskError, summary: &str) -> TaskError {
    match err {
        TaskError::NotFound(_) => err,
        other => {
            error!(error = %other, "{summary}");
            TaskError::Internal(summary.to_string())
        }
    }
}
