//! Wire ↔ domain mapping for the task RPCs.

use domain_tasks::{CreateTask, Task};
use rpc::tasks::v1 as proto;

pub fn task_to_proto(task: Task) -> proto::Task {
    proto::Task {
        id: task.id,
        title: task.title,
        description: task.description,
        status: task.status,
        created_at: task.created_at,
        updated_at: task.updated_at,
    }
}

pub fn add_request_to_domain(req: proto::AddTaskRequest) -> CreateTask {
    CreateTask::new(req.title, req.description, req.status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_to_proto_keeps_every_field() {
        let task = Task {
            id: "7".to_string(),
            title: "Write report".to_string(),
            description: "quarterly".to_string(),
            status: "pending".to_string(),
            created_at: "2025-01-01T10:00:00.000000Z".to_string(),
            updated_at: "2025-01-02T10:00:00.000000Z".to_string(),
        };

        let proto = task_to_proto(task);

        assert_eq!(proto.id, "7");
        assert_eq!(proto.title, "Write report");
        assert_eq!(proto.description, "quarterly");
        assert_eq!(proto.status, "pending");
        assert_eq!(proto.created_at, "2025-01-01T10:00:00.000000Z");
        assert_eq!(proto.updated_at, "2025-01-02T10:00:00.000000Z");
    }

    #[test]
    fn test_add_request_passes_empty_fields_through() {
        let input = add_request_to_domain(proto::AddTaskRequest {
            title: "Buy milk".to_string(),
            description: String::new(),
            status: String::new(),
        });

        assert_eq!(input, CreateTask::new("Buy milk", "", ""));
    }
}
