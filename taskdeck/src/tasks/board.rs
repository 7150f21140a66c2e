//! The task board: collection, filter and error surface.
//!
//! Every mutation is applied only after the server has confirmed it, so a
//! failed operation never needs rolling back. Failures land in the single
//! error slot; the slot is cleared only by [`TaskBoard::begin_fetch`].

use taskdeck_proto::task::{Filter, Task, TaskId};

use crate::api::RepositoryError;

/// Identifies one listing request issued by [`TaskBoard::begin_fetch`].
///
/// Only the response for the most recently issued ticket is applied, so a
/// slow response to an older filter cannot overwrite a newer listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonic request generation.
    pub generation: u64,
    /// Filter the listing was requested for.
    pub filter: Filter,
}

/// Application state owned by the shell and read by the views.
#[derive(Debug, Default)]
pub struct TaskBoard {
    /// Tasks in server order.
    tasks: Vec<Task>,
    /// Active filter.
    filter: Filter,
    /// Current banner message, if any.
    error: Option<String>,
    /// Generation of the latest issued fetch ticket.
    generation: u64,
}

impl TaskBoard {
    /// Creates an empty board with the `all` filter and no error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks currently displayed, in server order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Active filter.
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    /// Current error banner message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of displayed tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the collection is empty (renders the placeholder).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a displayed task by id.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Latest issued fetch ticket, if any fetch has started.
    #[must_use]
    pub const fn latest_ticket(&self) -> Option<FetchTicket> {
        if self.generation == 0 {
            None
        } else {
            Some(FetchTicket {
                generation: self.generation,
                filter: self.filter,
            })
        }
    }

    /// Begin-fetch transition: selects `filter`, clears the error banner
    /// and issues a new ticket that supersedes every earlier one.
    pub fn begin_fetch(&mut self, filter: Filter) -> FetchTicket {
        self.filter = filter;
        self.error = None;
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            filter,
        }
    }

    /// Applies a listing response.
    ///
    /// On success the collection is replaced wholesale. On failure the
    /// previous collection is kept and the error is set. Responses for a
    /// superseded ticket are dropped without touching any state.
    ///
    /// Returns `true` if the response was applied.
    pub fn apply_listing(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Task>, RepositoryError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                filter = %ticket.filter,
                "discarding superseded task listing"
            );
            return false;
        }
        match result {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => self.record_failure(&e),
        }
        true
    }

    /// Applies a create response: appends the server's task.
    pub fn apply_created(&mut self, result: Result<Task, RepositoryError>) {
        match result {
            Ok(task) => self.tasks.push(task),
            Err(e) => self.record_failure(&e),
        }
    }

    /// Applies a delete response: removes the task with `id` if displayed.
    pub fn apply_deleted(&mut self, id: &TaskId, result: Result<(), RepositoryError>) {
        match result {
            Ok(()) => self.tasks.retain(|t| &t.id != id),
            Err(e) => self.record_failure(&e),
        }
    }

    /// Applies a status-update response: the server's copy replaces the
    /// displayed task with `id`, picking up any other changed fields.
    pub fn apply_status_update(&mut self, id: &TaskId, result: Result<Task, RepositoryError>) {
        match result {
            Ok(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| &t.id == id) {
                    *slot = task;
                }
            }
            Err(e) => self.record_failure(&e),
        }
    }

    /// Overwrites the error banner.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    fn record_failure(&mut self, err: &RepositoryError) {
        tracing::warn!(error = %err, cause = ?err.cause(), "task operation failed");
        self.set_error(err.user_message());
    }
}
