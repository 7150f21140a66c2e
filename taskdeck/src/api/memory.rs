//! In-memory task repository for testing and offline demos.
//!
//! Behaves like the task API: ids are assigned on creation, listings are
//! filtered by status in insertion order, and unknown ids produce a
//! `404 Task not found` failure. Failures and per-filter listing delays
//! can be injected to exercise error paths and out-of-order completion.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

use taskdeck_proto::task::{Filter, NewTask, Task, TaskId, TaskStatus};

use super::{ApiFailure, RepositoryError, TaskRepository};

/// Which repository operation an injected failure applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// [`TaskRepository::list_tasks`].
    List,
    /// [`TaskRepository::create_task`].
    Create,
    /// [`TaskRepository::delete_task`].
    Delete,
    /// [`TaskRepository::update_status`].
    UpdateStatus,
}

#[derive(Debug, Default)]
struct Store {
    tasks: Vec<Task>,
    next_id: i64,
    failures: HashMap<Operation, ApiFailure>,
    list_delays: HashMap<Filter, Duration>,
    calls: usize,
}

impl Store {
    fn take_failure(&mut self, op: Operation) -> Option<ApiFailure> {
        self.calls += 1;
        self.failures.remove(&op)
    }
}

fn not_found() -> ApiFailure {
    ApiFailure::Status {
        status: 404,
        detail: "Task not found".to_string(),
    }
}

/// [`TaskRepository`] holding tasks in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    store: Mutex<Store>,
}

impl InMemoryRepository {
    /// Creates an empty repository; the first created task gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Creates a repository pre-populated with `tasks`.
    ///
    /// New ids continue after the largest numeric id present.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks
            .iter()
            .filter_map(|t| t.id.as_number())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            store: Mutex::new(Store {
                tasks,
                next_id,
                ..Store::default()
            }),
        }
    }

    /// A small board used by `--offline` mode.
    #[must_use]
    pub fn seeded() -> Self {
        let task = |id: i64, title: &str, description: &str, status| Task {
            id: TaskId::from(id),
            title: title.to_string(),
            description: description.to_string(),
            status,
            created_at: None,
        };
        Self::with_tasks(vec![
            task(1, "Sketch the board layout", "Form, filters, list", TaskStatus::Done),
            task(2, "Wire up the task API", "", TaskStatus::InProgress),
            task(3, "Write release notes", "Mention offline mode", TaskStatus::Pending),
        ])
    }

    /// Makes the next call of `op` fail with `failure`.
    pub fn fail_next(&self, op: Operation, failure: ApiFailure) {
        self.store.lock().failures.insert(op, failure);
    }

    /// Delays every listing for `filter` by `delay` before it reads the store.
    pub fn delay_list(&self, filter: Filter, delay: Duration) {
        self.store.lock().list_delays.insert(filter, delay);
    }

    /// Total number of repository calls received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.store.lock().calls
    }

    /// Copy of every stored task, regardless of status.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.store.lock().tasks.clone()
    }
}

impl TaskRepository for InMemoryRepository {
    async fn list_tasks(&self, filter: Filter) -> Result<Vec<Task>, RepositoryError> {
        let (failure, delay) = {
            let mut store = self.store.lock();
            (
                store.take_failure(Operation::List),
                store.list_delays.get(&filter).copied(),
            )
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(failure) = failure {
            return Err(RepositoryError::Connectivity(failure));
        }
        let store = self.store.lock();
        Ok(store
            .tasks
            .iter()
            .filter(|t| filter.matches(t.status))
            .cloned()
            .collect())
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<Task, RepositoryError> {
        let mut store = self.store.lock();
        if let Some(failure) = store.take_failure(Operation::Create) {
            return Err(RepositoryError::Creation(failure));
        }
        let task = Task {
            id: TaskId::from(store.next_id),
            title: new_task.title.clone(),
            description: new_task.description.clone(),
            status: new_task.status,
            created_at: Some(
                chrono::Utc::now()
                    .format("%Y-%m-%dT%H:%M:%S")
                    .to_string(),
            ),
        };
        store.next_id += 1;
        store.tasks.push(task.clone());
        Ok(task)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RepositoryError> {
        let mut store = self.store.lock();
        if let Some(failure) = store.take_failure(Operation::Delete) {
            return Err(RepositoryError::Deletion(failure));
        }
        let Some(pos) = store.tasks.iter().position(|t| &t.id == id) else {
            return Err(RepositoryError::Deletion(not_found()));
        };
        store.tasks.remove(pos);
        Ok(())
    }

    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> Result<Task, RepositoryError> {
        let mut store = self.store.lock();
        if let Some(failure) = store.take_failure(Operation::UpdateStatus) {
            return Err(RepositoryError::Update(failure));
        }
        let task = store
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| RepositoryError::Update(not_found()))?;
        task.status = status;
        Ok(task.clone())
    }
}
