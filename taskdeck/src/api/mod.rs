//! Task repository abstraction for `TaskDeck`.
//!
//! Defines the [`TaskRepository`] trait covering the four remote task
//! operations. Concrete implementations:
//! - [`http::HttpTaskRepository`]: talks to the task API over HTTP
//! - [`memory::InMemoryRepository`]: in-process store for tests and offline demos

pub mod http;
pub mod memory;

use std::fmt;

use taskdeck_proto::task::{Filter, NewTask, Task, TaskId, TaskStatus};

/// Why a single repository call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// The request never produced a response (refused, DNS, reset, ...).
    Transport(String),
    /// The server answered with a non-success status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail, or the raw body.
        detail: String,
    },
    /// The server answered 2xx but the body was not the expected shape.
    Decode(String),
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Status { status, detail } if detail.is_empty() => {
                write!(f, "server returned {status}")
            }
            Self::Status { status, detail } => write!(f, "server returned {status}: {detail}"),
            Self::Decode(msg) => write!(f, "unexpected response body: {msg}"),
        }
    }
}

/// Errors surfaced by [`TaskRepository`] operations, one per operation.
///
/// Structured causes stop at this boundary: the task board only keeps the
/// [`user_message`](Self::user_message).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// Listing tasks failed.
    #[error("listing tasks failed: {0}")]
    Connectivity(ApiFailure),
    /// Creating a task failed.
    #[error("creating task failed: {0}")]
    Creation(ApiFailure),
    /// Deleting a task failed, including when the id no longer exists.
    #[error("deleting task failed: {0}")]
    Deletion(ApiFailure),
    /// Changing a task's status failed.
    #[error("updating task status failed: {0}")]
    Update(ApiFailure),
}

impl RepositoryError {
    /// Message shown in the error banner.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Connectivity(_) => {
                "Could not connect to the server. Please make sure it is running."
            }
            Self::Creation(_) => "Failed to add the task.",
            Self::Deletion(_) => "Failed to delete the task.",
            Self::Update(_) => "Failed to update the task status.",
        }
    }

    /// The underlying failure.
    #[must_use]
    pub const fn cause(&self) -> &ApiFailure {
        match self {
            Self::Connectivity(c) | Self::Creation(c) | Self::Deletion(c) | Self::Update(c) => c,
        }
    }
}

/// Async access to the remote task collection.
///
/// Every call is issued exactly once: no retries, no cancellation, and no
/// timeout beyond whatever the underlying transport imposes.
pub trait TaskRepository: Send + Sync {
    /// Fetch the tasks matching `filter`, in server order.
    fn list_tasks(
        &self,
        filter: Filter,
    ) -> impl std::future::Future<Output = Result<Vec<Task>, RepositoryError>> + Send;

    /// Create a task; the server assigns its id.
    fn create_task(
        &self,
        new_task: &NewTask,
    ) -> impl std::future::Future<Output = Result<Task, RepositoryError>> + Send;

    /// Delete the task with `id`.
    fn delete_task(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Set the status of the task with `id`, returning the server's copy.
    fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> impl std::future::Future<Output = Result<Task, RepositoryError>> + Send;
}
