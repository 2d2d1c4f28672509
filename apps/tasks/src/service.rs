//! Task gRPC handlers
//!
//! Thin adapters from `tasks.v1.TaskService` onto the domain [`TaskService`].
//! Every error is already classified by the domain layer; the handlers only
//! translate it with `Status::from`.

use domain_tasks::{TaskRepository, TaskService};
use rpc::tasks::v1::{
    AddTaskReply, AddTaskRequest, CompleteTaskReply, CompleteTaskRequest, GetTasksReply,
    GetTasksRequest, task_service_server::TaskService as TaskServiceRpc,
};
use tonic::{Request, Response, Status};
use tracing::info;

use crate::conversions::{add_request_to_domain, task_to_proto};

/// gRPC service implementation for tasks.
///
/// Generic over the repository type for testability.
pub struct TasksServiceImpl<R>
where
    R: TaskRepository + 'static,
{
    service: TaskService<R>,
}

impl<R> TasksServiceImpl<R>
where
    R: TaskRepository + 'static,
{
    pub fn new(service: TaskService<R>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<R> TaskServiceRpc for TasksServiceImpl<R>
where
    R: TaskRepository + 'static,
{
    async fn get_tasks(
        &self,
        _request: Request<GetTasksRequest>,
    ) -> Result<Response<GetTasksReply>, Status> {
        info!("GetTasks called");
        let tasks = self.service.list_tasks().await.map_err(Status::from)?;
        Ok(Response::new(GetTasksReply {
            tasks: tasks.into_iter().map(task_to_proto).collect(),
        }))
    }

    async fn add_task(
        &self,
        request: Request<AddTaskRequest>,
    ) -> Result<Response<AddTaskReply>, Status> {
        let req = request.into_inner();
        info!(title = %req.title, "AddTask called");
        let task = self
            .service
            .add_task(add_request_to_domain(req))
            .await
            .map_err(Status::from)?;
        Ok(Response::new(AddTaskReply {
            task: Some(task_to_proto(task)),
        }))
    }

    async fn complete_task(
        &self,
        request: Request<CompleteTaskRequest>,
    ) -> Result<Response<CompleteTaskReply>, Status> {
        let req = request.into_inner();
        info!(task_id = %req.task_id, "CompleteTask called");
        let task = self
            .service
            .complete_task(&req.task_id)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(CompleteTaskReply {
            task: Some(task_to_proto(task)),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use domain_tasks::{CreateTask, STATUS_COMPLETED, STATUS_PENDING, Task, TaskError, TaskResult};
    use std::sync::{Arc, Mutex};
    use tonic::Code;

    /// Store that behaves like the PostgreSQL table: sequential ids, newest
    /// first, a clock that moves on every write.
    #[derive(Default)]
    struct InMemoryRepository {
        state: Mutex<State>,
    }

    #[derive(Default)]
    struct State {
        tasks: Vec<Task>,
        next_id: u64,
        clock: u64,
        fail: bool,
    }

    impl State {
        fn tick(&mut self) -> String {
            self.clock += 1;
            format!("2025-01-01T10:00:00.{:06}Z", self.clock)
        }

        fn check(&self) -> TaskResult<()> {
            if self.fail {
                Err(TaskError::Database("connection reset by peer".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl InMemoryRepository {
        fn failing() -> Self {
            let repo = Self::default();
            repo.state.lock().unwrap().fail = true;
            repo
        }
    }

    #[async_trait]
    impl TaskRepository for InMemoryRepository {
        async fn fetch_all(&self) -> TaskResult<Vec<Task>> {
            let state = self.state.lock().unwrap();
            state.check()?;
            Ok(state.tasks.iter().rev().cloned().collect())
        }

        async fn insert(&self, input: CreateTask) -> TaskResult<Task> {
            let mut state = self.state.lock().unwrap();
            state.check()?;
            state.next_id += 1;
            let now = state.tick();
            let task = Task {
                id: state.next_id.to_string(),
                title: input.title,
                description: input.description,
                status: input.status,
                created_at: now.clone(),
                updated_at: now,
            };
            state.tasks.push(task.clone());
            Ok(task)
        }

        async fn fetch_by_id(&self, id: &str) -> TaskResult<Task> {
            let state = self.state.lock().unwrap();
            state.check()?;
            state
                .tasks
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or_else(|| TaskError::NotFound(id.to_string()))
        }

        async fn update_status(&self, id: &str, status: &str) -> TaskResult<Task> {
            let mut state = self.state.lock().unwrap();
            state.check()?;
            let now = state.tick();
            let task = state
                .tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
            task.status = status.to_string();
            task.updated_at = now;
            Ok(task.clone())
        }

        async fn transition_status(&self, id: &str, status: &str) -> TaskResult<Option<Task>> {
            let mut state = self.state.lock().unwrap();
            state.check()?;
            let now = state.tick();
            let Some(task) = state
                .tasks
                .iter_mut()
                .find(|t| t.id == id && t.status != status)
            else {
                return Ok(None);
            };
            task.status = status.to_string();
            task.updated_at = now;
            Ok(Some(task.clone()))
        }
    }

    fn handler() -> TasksServiceImpl<InMemoryRepository> {
        TasksServiceImpl::new(TaskService::new(InMemoryRepository::default()))
    }

    async fn add(
        svc: &TasksServiceImpl<InMemoryRepository>,
        title: &str,
    ) -> Result<rpc::tasks::v1::Task, Status> {
        let reply = svc
            .add_task(Request::new(AddTaskRequest {
                title: title.to_string(),
                description: String::new(),
                status: String::new(),
            }))
            .await?;
        Ok(reply.into_inner().task.unwrap())
    }

    async fn complete(
        svc: &TasksServiceImpl<InMemoryRepository>,
        id: &str,
    ) -> Result<rpc::tasks::v1::Task, Status> {
        let reply = svc
            .complete_task(Request::new(CompleteTaskRequest {
                task_id: id.to_string(),
            }))
            .await?;
        Ok(reply.into_inner().task.unwrap())
    }

    async fn list(svc: &TasksServiceImpl<InMemoryRepository>) -> Vec<rpc::tasks::v1::Task> {
        svc.get_tasks(Request::new(GetTasksRequest {}))
            .await
            .unwrap()
            .into_inner()
            .tasks
    }

    #[tokio::test]
    async fn test_add_defaults_status_to_pending() {
        let svc = handler();

        let task = add(&svc, "Buy milk").await.unwrap();

        assert_eq!(task.id, "1");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "");
        assert_eq!(task.status, STATUS_PENDING);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[tokio::test]
    async fn test_list_after_add_returns_that_task() {
        let svc = handler();
        let task = add(&svc, "Buy milk").await.unwrap();

        assert_eq!(list(&svc).await, vec![task]);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let svc = handler();
        add(&svc, "first").await.unwrap();
        add(&svc, "second").await.unwrap();

        let titles: Vec<_> = list(&svc).await.into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        assert!(list(&handler()).await.is_empty());
    }

    #[tokio::test]
    async fn test_complete_then_complete_again() {
        let svc = handler();
        let task = add(&svc, "Buy milk").await.unwrap();

        let done = complete(&svc, &task.id).await.unwrap();
        assert_eq!(done.status, STATUS_COMPLETED);
        assert!(done.updated_at > task.updated_at);
        assert_eq!(done.id, task.id);
        assert_eq!(done.title, task.title);
        assert_eq!(done.description, task.description);
        assert_eq!(done.created_at, task.created_at);

        let err = complete(&svc, &task.id).await.unwrap_err();
        assert_eq!(err.code(), Code::FailedPrecondition);
        assert_eq!(list(&svc).await, vec![done]);
    }

    #[tokio::test]
    async fn test_complete_unknown_id() {
        let svc = handler();
        let err = complete(&svc, "999").await.unwrap_err();
        assert_eq!(err.code(), Code::NotFound);
        assert!(err.message().contains("999"));
    }

    #[tokio::test]
    async fn test_complete_unknown_id_leaves_store_unchanged() {
        let svc = handler();
        add(&svc, "keep me").await.unwrap();
        let before = list(&svc).await;

        let err = complete(&svc, "999").await.unwrap_err();
        assert_eq!(err.code(), Code::NotFound);

        let after = list(&svc).await;
        assert_eq!(after, before);
        assert_eq!(after[0].status, "pending");
        assert_eq!(after[0].updated_at, before[0].updated_at);
    }

    #[tokio::test]
    async fn test_complete_empty_id() {
        let err = complete(&handler(), "").await.unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_add_empty_title_leaves_store_unchanged() {
        let svc = handler();
        add(&svc, "existing").await.unwrap();
        let before = list(&svc).await;

        let err = add(&svc, "").await.unwrap_err();

        assert_eq!(err.code(), Code::InvalidArgument);
        assert_eq!(list(&svc).await, before);
    }

    #[tokio::test]
    async fn test_storage_failure_hides_detail() {
        let svc = TasksServiceImpl::new(TaskService::new(InMemoryRepository::failing()));

        let err = svc
            .get_tasks(Request::new(GetTasksRequest {}))
            .await
            .unwrap_err();

        assert_eq!(err.code(), Code::Internal);
        assert!(!err.message().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_concurrent_complete_has_one_winner() {
        let svc = Arc::new(handler());
        let task = add(&svc, "race").await.unwrap();

        let calls: Vec<_> = (0..16)
            .map(|_| {
                let svc = svc.clone();
                let id = task.id.clone();
                tokio::spawn(async move { complete(&svc, &id).await })
            })
            .collect();

        let mut winners = 0;
        let mut conflicts = 0;
        for call in calls {
            match call.await.unwrap() {
                Ok(_) => winners += 1,
                Err(status) if status.code() == Code::FailedPrecondition => conflicts += 1,
                Err(status) => panic!("unexpected status: {status:?}"),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(conflicts, 15);
    }
}
