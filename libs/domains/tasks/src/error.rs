use thiserror::Error;
use tonic::Status;

/// Outcomes the task service can report.
///
/// The adapter only ever produces `NotFound` and `Database`. The service
/// turns `Database` into `Internal` after logging it, so `Database` text
/// never reaches a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),

    #[error("task with ID '{0}' not found")]
    NotFound(String),

    #[error("task with ID '{0}' is already completed")]
    AlreadyCompleted(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}

impl From<TaskError> for Status {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Validation(msg) => Status::invalid_argument(msg),
            TaskError::NotFound(_) => Status::not_found(err.to_string()),
            TaskError::AlreadyCompleted(_) => Status::failed_precondition(err.to_string()),
            TaskError::Internal(msg) => Status::internal(msg),
            TaskError::Database(_) => Status::internal("internal storage error"),
        }
    }
}
