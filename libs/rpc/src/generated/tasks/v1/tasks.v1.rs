// @generated
// This file is @generated by prost-build.
/// A unit of work tracked by the task service.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Task {
    /// Opaque identifier assigned by the store.
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag="2")]
    pub title: ::prost::alloc::string::String,
    /// Empty when the task has no description.
    #[prost(string, tag="3")]
    pub description: ::prost::alloc::string::String,
    /// Free-form lifecycle label; "completed" is terminal.
    #[prost(string, tag="4")]
    pub status: ::prost::alloc::string::String,
    /// RFC 3339, UTC.
    #[prost(string, tag="5")]
    pub created_at: ::prost::alloc::string::String,
    #[prost(string, tag="6")]
    pub updated_at: ::prost::alloc::string::String,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GetTasksRequest {
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetTasksReply {
    /// Newest first.
    #[prost(message, repeated, tag="1")]
    pub tasks: ::prost::alloc::vec::Vec<Task>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddTaskRequest {
    #[prost(string, tag="1")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag="2")]
    pub description: ::prost::alloc::string::String,
    /// Defaults to "pending" when empty.
    #[prost(string, tag="3")]
    pub status: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddTaskReply {
    #[prost(message, optional, tag="1")]
    pub task: ::core::option::Option<Task>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CompleteTaskRequest {
    #[prost(string, tag="1")]
    pub task_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CompleteTaskReply {
    #[prost(message, optional, tag="1")]
    pub task: ::core::option::Option<Task>,
}
include!("tasks.v1.tonic.rs");
// @@protoc_insertion_point(module)
