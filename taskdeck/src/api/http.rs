//! HTTP task repository.
//!
//! Maps each [`TaskRepository`] operation onto the task API:
//!
//! | Operation | Request |
//! |---|---|
//! | list | `GET /tasks/` or `GET /tasks/?status={filter}` |
//! | create | `POST /tasks/` with `{title, description, status}` |
//! | delete | `DELETE /tasks/{id}` |
//! | update status | `PUT /tasks/{id}` with `{status}` |
//!
//! Response bodies are buffered and decoded with [`taskdeck_proto::codec`]
//! so that non-success responses can report the server's `detail`.

use reqwest::{Client, RequestBuilder};
use url::Url;

use taskdeck_proto::codec;
use taskdeck_proto::task::{Filter, NewTask, StatusUpdate, Task, TaskId, TaskStatus};

use super::{ApiFailure, RepositoryError, TaskRepository};

/// Errors from validating the configured base URL.
#[derive(Debug, thiserror::Error)]
pub enum BaseUrlError {
    /// The string is not a URL.
    #[error("invalid API base URL {url:?}: {source}")]
    Parse {
        /// The rejected input.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },
    /// The URL is not an `http`/`https` URL that can carry a path.
    #[error("API base URL must be an http(s) URL, got {0:?}")]
    UnsupportedScheme(String),
}

/// Parses and validates an API base URL.
///
/// # Errors
///
/// Returns [`BaseUrlError`] if the string does not parse or is not an
/// `http`/`https` URL.
pub fn parse_base_url(raw: &str) -> Result<Url, BaseUrlError> {
    let url = Url::parse(raw).map_err(|source| BaseUrlError::Parse {
        url: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(BaseUrlError::UnsupportedScheme(raw.to_string()));
    }
    Ok(url)
}

/// [`TaskRepository`] backed by the remote task API.
#[derive(Debug, Clone)]
pub struct HttpTaskRepository {
    client: Client,
    base: Url,
}

impl HttpTaskRepository {
    /// Creates a repository for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`BaseUrlError`] if `base_url` is not a usable http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, BaseUrlError> {
        Ok(Self::with_client(parse_base_url(base_url)?, Client::new()))
    }

    /// Creates a repository with an explicit client.
    #[must_use]
    pub const fn with_client(base: Url, client: Client) -> Self {
        Self { client, base }
    }

    /// The API root requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/tasks/`, keeping any path prefix on the base URL.
    fn collection_url(&self) -> Result<Url, ApiFailure> {
        self.url_with_segments(&["tasks", ""])
    }

    /// `{base}/tasks/{id}` with the id percent-encoded as one segment.
    fn item_url(&self, id: &TaskId) -> Result<Url, ApiFailure> {
        self.url_with_segments(&["tasks", &id.to_string()])
    }

    fn url_with_segments(&self, segments: &[&str]) -> Result<Url, ApiFailure> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| ApiFailure::Transport(format!("cannot extend base URL {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and returns the body of a 2xx response.
    async fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiFailure> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiFailure::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiFailure::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiFailure::Status {
                status: status.as_u16(),
                detail: codec::error_detail(&body).unwrap_or_default(),
            });
        }
        Ok(body.to_vec())
    }

    async fn fetch_list(&self, filter: Filter) -> Result<Vec<Task>, ApiFailure> {
        let mut url = self.collection_url()?;
        if let Some(status) = filter.status() {
            url.query_pairs_mut().append_pair("status", status.as_str());
        }
        tracing::debug!(%url, %filter, "GET task list");
        let body = self.execute(self.client.get(url)).await?;
        codec::decode_task_list(&body).map_err(|e| ApiFailure::Decode(e.to_string()))
    }

    async fn post_task(&self, new_task: &NewTask) -> Result<Task, ApiFailure> {
        let url = self.collection_url()?;
        tracing::debug!(%url, title = %new_task.title, "POST task");
        let body = self.execute(self.client.post(url).json(new_task)).await?;
        codec::decode_task(&body).map_err(|e| ApiFailure::Decode(e.to_string()))
    }

    async fn remove_task(&self, id: &TaskId) -> Result<(), ApiFailure> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, "DELETE task");
        self.execute(self.client.delete(url)).await.map(|_| ())
    }

    async fn put_status(&self, id: &TaskId, status: TaskStatus) -> Result<Task, ApiFailure> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, %status, "PUT task status");
        let body = self
            .execute(self.client.put(url).json(&StatusUpdate { status }))
            .await?;
        codec::decode_task(&body).map_err(|e| ApiFailure::Decode(e.to_string()))
    }
}

impl TaskRepository for HttpTaskRepository {
    async fn list_tasks(&self, filter: Filter) -> Result<Vec<Task>, RepositoryError> {
        self.fetch_list(filter)
            .await
            .map_err(RepositoryError::Connectivity)
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<Task, RepositoryError> {
        self.post_task(new_task)
            .await
            .map_err(RepositoryError::Creation)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RepositoryError> {
        self.remove_task(id).await.map_err(RepositoryError::Deletion)
    }

    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> Result<Task, RepositoryError> {
        self.put_status(id, status)
            .await
            .map_err(RepositoryError::Update)
    }
}
