//! Sync worker wiring the TUI to the async task repository.
//!
//! This module bridges the synchronous TUI event loop (crossterm poll-based)
//! with the async [`TaskRepository`]. It spawns a background tokio task and
//! communicates with the main thread via [`SyncCommand`] / [`SyncEvent`]
//! channels.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── SyncEvent ───  command handler ──┬─ request task
//!                     ─── SyncCommand →                   ├─ request task
//!                                                          └─ ...
//! ```
//!
//! Each command runs on its own tokio task, so a slow request never holds
//! up the ones behind it. Results come back in completion order; the
//! [`TaskBoard`](crate::tasks::TaskBoard) decides what to apply.

use std::sync::Arc;

use tokio::sync::mpsc;

use taskdeck_proto::task::{NewTask, Task, TaskId, TaskStatus};

use crate::api::{RepositoryError, TaskRepository};
use crate::tasks::FetchTicket;

/// Default channel capacity for commands and events.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Commands sent from the TUI main loop to the sync worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    /// Fetch the listing described by `ticket`.
    List {
        /// Ticket issued by `TaskBoard::begin_fetch`.
        ticket: FetchTicket,
    },
    /// Create a task.
    Create(NewTask),
    /// Delete a task.
    Delete {
        /// Task to delete.
        id: TaskId,
    },
    /// Change a task's status.
    UpdateStatus {
        /// Task to update.
        id: TaskId,
        /// Requested status.
        status: TaskStatus,
    },
    /// Stop accepting commands. Requests already in flight still report.
    Shutdown,
}

/// Results sent from the sync worker back to the TUI main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A listing completed.
    Listed {
        /// Ticket the listing was requested with.
        ticket: FetchTicket,
        /// Tasks in server order, or the failure.
        result: Result<Vec<Task>, RepositoryError>,
    },
    /// A create completed.
    Created(Result<Task, RepositoryError>),
    /// A delete completed.
    Deleted {
        /// Task the delete was for.
        id: TaskId,
        /// Outcome.
        result: Result<(), RepositoryError>,
    },
    /// A status update completed.
    StatusUpdated {
        /// Task the update was for.
        id: TaskId,
        /// Server copy of the task, or the failure.
        result: Result<Task, RepositoryError>,
    },
}

/// Runs one command against `repo` and returns its result event.
///
/// Returns `None` for [`SyncCommand::Shutdown`].
pub async fn execute<R: TaskRepository>(repo: &R, cmd: SyncCommand) -> Option<SyncEvent> {
    let event = match cmd {
        SyncCommand::List { ticket } => SyncEvent::Listed {
            ticket,
            result: repo.list_tasks(ticket.filter).await,
        },
        SyncCommand::Create(new_task) => SyncEvent::Created(repo.create_task(&new_task).await),
        SyncCommand::Delete { id } => {
            let result = repo.delete_task(&id).await;
            SyncEvent::Deleted { id, result }
        }
        SyncCommand::UpdateStatus { id, status } => {
            let result = repo.update_status(&id, status).await;
            SyncEvent::StatusUpdated { id, result }
        }
        SyncCommand::Shutdown => return None,
    };
    Some(event)
}

/// Spawn the sync worker and return channel handles.
///
/// Must be called from within a tokio runtime.
pub fn spawn_sync<R>(
    repo: Arc<R>,
    channel_capacity: usize,
) -> (mpsc::Sender<SyncCommand>, mpsc::Receiver<SyncEvent>)
where
    R: TaskRepository + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<SyncCommand>(channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<SyncEvent>(channel_capacity);

    tokio::spawn(async move {
        command_handler(repo, cmd_rx, evt_tx).await;
    });

    (cmd_tx, evt_rx)
}

/// Background task: handle commands from the TUI main loop.
///
/// Spawns one request task per command; nothing is queued behind an
/// in-flight request and nothing is cancelled.
async fn command_handler<R>(
    repo: Arc<R>,
    mut cmd_rx: mpsc::Receiver<SyncCommand>,
    evt_tx: mpsc::Sender<SyncEvent>,
) where
    R: TaskRepository + 'static,
{
    while let Some(cmd) = cmd_rx.recv().await {
        if cmd == SyncCommand::Shutdown {
            tracing::info!("sync command handler shutting down");
            break;
        }
        tracing::debug!(?cmd, "dispatching task request");
        let repo = Arc::clone(&repo);
        let evt_tx = evt_tx.clone();
        tokio::spawn(async move {
            if let Some(event) = execute(repo.as_ref(), cmd).await
                && evt_tx.send(event).await.is_err()
            {
                tracing::debug!("TUI dropped the event channel; result discarded");
            }
        });
    }
}
