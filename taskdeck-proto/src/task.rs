//! Task model for the `TaskDeck` HTTP API.
//!
//! Defines the task resource as the server sends it, the status and filter
//! enums, and the request bodies for creating a task and changing its
//! status. All types serialize to the JSON shapes the API expects.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned task identifier.
///
/// Opaque to the client: it may arrive as a JSON integer or a JSON string,
/// and it is only ever compared for equality or rendered into a URL path.
/// Nothing assumes ids are sequential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(IdRepr);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(i64),
    Text(String),
}

impl TaskId {
    /// Returns the numeric id, if the server issued one.
    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self.0 {
            IdRepr::Number(n) => Some(n),
            IdRepr::Text(_) => None,
        }
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        Self(IdRepr::Number(n))
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(IdRepr::Text(s.to_string()))
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(IdRepr::Text(s))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            IdRepr::Number(n) => write!(f, "{n}"),
            IdRepr::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Lifecycle stage of a task.
///
/// Transitions are chosen by the user; the client does not enforce any
/// ordering between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Pending,
    /// Actively being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Done];

    /// Wire value (`pending`, `in_progress`, `done`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// The status after this one, wrapping from `Done` back to `Pending`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Pending => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which subset of tasks to request from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// No status restriction.
    #[default]
    All,
    /// Only pending tasks.
    Pending,
    /// Only in-progress tasks.
    InProgress,
    /// Only finished tasks.
    Done,
}

impl Filter {
    /// Every filter, in the order the filter bar shows them.
    pub const ALL: [Self; 4] = [Self::All, Self::Pending, Self::InProgress, Self::Done];

    /// The status this filter restricts to, or `None` for [`Filter::All`].
    #[must_use]
    pub const fn status(self) -> Option<TaskStatus> {
        match self {
            Self::All => None,
            Self::Pending => Some(TaskStatus::Pending),
            Self::InProgress => Some(TaskStatus::InProgress),
            Self::Done => Some(TaskStatus::Done),
        }
    }

    /// Label shown on the filter bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Position of this filter in [`Filter::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::All => 0,
            Self::Pending => 1,
            Self::InProgress => 2,
            Self::Done => 3,
        }
    }

    /// Next filter to the right, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous filter to the left, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether a task with `status` belongs to this filter.
    #[must_use]
    pub fn matches(self, status: TaskStatus) -> bool {
        self.status().is_none_or(|s| s == status)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status() {
            Some(status) => f.write_str(status.as_str()),
            None => f.write_str("all"),
        }
    }
}

/// A task as confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Task title. Never empty when created through this client.
    pub title: String,
    /// Free-form description; `null` or missing on the wire becomes empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Current lifecycle stage.
    pub status: TaskStatus,
    /// Server creation timestamp, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Body of `POST /tasks/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Title as typed by the user.
    pub title: String,
    /// Description as typed by the user (may be empty).
    pub description: String,
    /// Always [`TaskStatus::Pending`] for new tasks.
    pub status: TaskStatus,
}

impl NewTask {
    /// Builds a creation request with the initial `pending` status.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: TaskStatus::Pending,
        }
    }
}

/// Body of `PUT /tasks/{id}` when only the status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// The requested status.
    pub status: TaskStatus,
}
