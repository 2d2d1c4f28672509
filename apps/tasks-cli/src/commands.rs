//! Runs one command against the task server.

use std::time::Duration;

use grpc_client::{ClientConfig, GrpcError, create_channel_with_config};
use rpc::tasks::v1::task_service_client::TaskServiceClient;
use rpc::tasks::v1::{AddTaskRequest, CompleteTaskRequest, GetTasksRequest};
use thiserror::Error;
use tonic::Request;
use tonic::codec::CompressionEncoding;
use tracing::{debug, info, instrument};

use crate::render::Output;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("title is required. Use --title or -t flag")]
    MissingTitle,

    #[error("task ID is required. Use --id flag")]
    MissingId,

    #[error(transparent)]
    Connect(#[from] GrpcError),

    #[error("{:?}: {}", .0.code(), .0.message())]
    Rpc(#[from] tonic::Status),

    #[error("server reply did not include a task")]
    EmptyReply,

    #[error("command timed out after {0:?}")]
    Timeout(Duration),
}

/// A validated command, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Add(AddTaskRequest),
    Complete(CompleteTaskRequest),
}

impl Command {
    /// Rejects an empty title or id without touching the network.
    pub fn add(
        title: String,
        description: String,
        status: String,
    ) -> Result<Self, CommandError> {
        if title.is_empty() {
            return Err(CommandError::MissingTitle);
        }
        Ok(Command::Add(AddTaskRequest {
            title,
            description,
            status,
        }))
    }

    pub fn complete(id: String) -> Result<Self, CommandError> {
        if id.is_empty() {
            return Err(CommandError::MissingId);
        }
        Ok(Command::Complete(CompleteTaskRequest { task_id: id }))
    }

    /// Prefix for a failure message, e.g. "Error: Could not add task".
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            Command::List => "Error: Could not get tasks",
            Command::Add(_) => "Error: Could not add task",
            Command::Complete(_) => "Error completing task",
        }
    }
}

/// Dials the server and runs `command` within `config.command_timeout`.
///
/// Each RPC additionally carries `config.call_timeout` as its deadline.
pub async fn execute(command: Command, config: &ClientConfig) -> Result<Output, CommandError> {
    tokio::time::timeout(config.command_timeout, run(command, config))
        .await
        .map_err(|_| CommandError::Timeout(config.command_timeout))?
}

#[instrument(skip_all, fields(server = %config.target))]
async fn run(command: Command, config: &ClientConfig) -> Result<Output, CommandError> {
    let channel = create_channel_with_config(config.target.clone(), config.channel()).await?;
    let mut client = TaskServiceClient::new(channel);
    if config.enable_compression {
        client = client
            .send_compressed(CompressionEncoding::Zstd)
            .accept_compressed(CompressionEncoding::Zstd);
    }
    debug!("Connected");

    match command {
        Command::List => {
            let reply = client
                .get_tasks(with_deadline(GetTasksRequest {}, config.call_timeout))
                .await?
                .into_inner();
            info!(count = reply.tasks.len(), "Tasks received");
            Ok(Output::Tasks(reply.tasks))
        }
        Command::Add(req) => {
            let reply = client
                .add_task(with_deadline(req, config.call_timeout))
                .await?
                .into_inner();
            let task = reply.task.ok_or(CommandError::EmptyReply)?;
            info!(id = %task.id, "Task added");
            Ok(Output::Added(task))
        }
        Command::Complete(req) => {
            let reply = client
                .complete_task(with_deadline(req, config.call_timeout))
                .await?
                .into_inner();
            let task = reply.task.ok_or(CommandError::EmptyReply)?;
            info!(id = %task.id, "Task completed");
            Ok(Output::Completed(task))
        }
    }
}

fn with_deadline<T>(message: T, timeout: Duration) -> Request<T> {
    let mut request = Request::new(message);
    request.set_timeout(timeout);
    request
}
