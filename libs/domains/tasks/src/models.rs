use validator::Validate;

/// Status given to a task created without one.
pub const STATUS_PENDING: &str = "pending";

/// Terminal status; a completed task never changes again.
pub const STATUS_COMPLETED: &str = "completed";

/// A tracked unit of work.
///
/// `description` is empty when the task has none. Timestamps are RFC 3339
/// strings in UTC with microsecond precision, assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    pub description: String,
    /// Empty means [`STATUS_PENDING`].
    pub status: String,
}

impl CreateTask {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: status.into(),
        }
    }

    /// Replaces an empty status with [`STATUS_PENDING`].
    pub fn with_default_status(mut self) -> Self {
        if self.status.is_empty() {
            self.status = STATUS_PENDING.to_string();
        }
        self
    }
}
