//! Integration tests for the HTTP task repository.
//!
//! Runs `HttpTaskRepository` against a `wiremock` server and checks that:
//! - every operation uses the documented method, path and body
//! - the status filter is sent as `?status=` and omitted for `all`
//! - server tasks decode with int or string ids and optional fields
//! - each failure kind maps onto the operation's error variant

#![allow(clippy::expect_used, clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdeck::api::http::HttpTaskRepository;
use taskdeck::api::{ApiFailure, RepositoryError, TaskRepository};
use taskdeck_proto::task::{Filter, NewTask, TaskId, TaskStatus};

async fn start() -> (MockServer, HttpTaskRepository) {
    let server = MockServer::start().await;
    let repo = HttpTaskRepository::new(&server.uri()).expect("mock server uri is a valid base");
    (server, repo)
}

fn server_task(id: i64, title: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "status": status,
        "created_at": "2025-09-29T10:00:00"
    })
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn list_all_omits_status_query() {
    let (server, repo) = start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            server_task(1, "Buy groceries", "pending"),
            server_task(2, "Ship release", "done"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = repo.list_tasks(Filter::All).await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, TaskId::from(1));
    assert_eq!(tasks[1].status, TaskStatus::Done);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn list_by_status_sends_query_param() {
    let (server, repo) = start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .and(query_param("status", "in_progress"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([server_task(
            4,
            "Write docs",
            "in_progress"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = repo.list_tasks(Filter::InProgress).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Write docs");
}

#[tokio::test]
async fn list_accepts_string_ids_and_missing_fields() {
    let (server, repo) = start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1b2", "title": "Opaque id", "description": null, "status": "pending"}
        ])))
        .mount(&server)
        .await;

    let tasks = repo.list_tasks(Filter::All).await.unwrap();
    assert_eq!(tasks[0].id, TaskId::from("a1b2"));
    assert_eq!(tasks[0].description, "");
    assert!(tasks[0].created_at.is_none());
}

#[tokio::test]
async fn list_server_error_is_connectivity() {
    let (server, repo) = start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = repo.list_tasks(Filter::All).await.unwrap_err();
    assert_eq!(
        err,
        RepositoryError::Connectivity(ApiFailure::Status {
            status: 500,
            detail: "boom".to_string(),
        })
    );
    assert_eq!(
        err.user_message(),
        "Could not connect to the server. Please make sure it is running."
    );
}

#[tokio::test]
async fn list_undecodable_body_is_connectivity_decode() {
    let (server, repo) = start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tasks": []})))
        .mount(&server)
        .await;

    let err = repo.list_tasks(Filter::All).await.unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Connectivity(ApiFailure::Decode(_))
    ));
}

#[tokio::test]
async fn unreachable_server_is_transport_failure() {
    // Bind then drop a listener so the port is very likely closed.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let repo = HttpTaskRepository::new(&format!("http://{addr}")).unwrap();

    let err = repo.list_tasks(Filter::All).await.unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::Connectivity(ApiFailure::Transport(_))
    ));
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_posts_pending_task_and_returns_server_copy() {
    let (server, repo) = start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/"))
        .and(body_json(json!({
            "title": "Buy groceries",
            "description": "Milk",
            "status": "pending"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7,
            "title": "Buy groceries",
            "description": "Milk",
            "status": "pending",
            "created_at": "2025-09-29T10:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = repo
        .create_task(&NewTask::new("Buy groceries", "Milk"))
        .await
        .unwrap();
    assert_eq!(created.id, TaskId::from(7));
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.created_at.as_deref(), Some("2025-09-29T10:00:00"));
}

#[tokio::test]
async fn create_validation_error_is_creation_with_detail() {
    let (server, repo) = start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"detail": "title too long"})),
        )
        .mount(&server)
        .await;

    let err = repo
        .create_task(&NewTask::new("x", ""))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RepositoryError::Creation(ApiFailure::Status {
            status: 422,
            detail: "title too long".to_string(),
        })
    );
    assert_eq!(err.user_message(), "Failed to add the task.");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_hits_item_path_and_ignores_body() {
    let (server, repo) = start().await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    repo.delete_task(&TaskId::from(3)).await.unwrap();
}

#[tokio::test]
async fn delete_missing_task_is_deletion_error() {
    let (server, repo) = start().await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Task not found"})),
        )
        .mount(&server)
        .await;

    let err = repo.delete_task(&TaskId::from(99)).await.unwrap_err();
    assert_eq!(
        err,
        RepositoryError::Deletion(ApiFailure::Status {
            status: 404,
            detail: "Task not found".to_string(),
        })
    );
    assert_eq!(err.user_message(), "Failed to delete the task.");
}

#[tokio::test]
async fn string_id_is_percent_encoded_as_one_segment() {
    let (server, repo) = start().await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/a%2Fb"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    repo.delete_task(&TaskId::from("a/b")).await.unwrap();
}

// =============================================================================
// Update status
// =============================================================================

#[tokio::test]
async fn update_puts_status_only() {
    let (server, repo) = start().await;
    Mock::given(method("PUT"))
        .and(path("/tasks/1"))
        .and(body_json(json!({"status": "done"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(server_task(
            1,
            "Buy groceries",
            "done",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let updated = repo
        .update_status(&TaskId::from(1), TaskStatus::Done)
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::Done);
    assert_eq!(updated.title, "Buy groceries");
}

#[tokio::test]
async fn update_failure_is_update_error() {
    let (server, repo) = start().await;
    Mock::given(method("PUT"))
        .and(path("/tasks/1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = repo
        .update_status(&TaskId::from(1), TaskStatus::InProgress)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        RepositoryError::Update(ApiFailure::Status {
            status: 503,
            detail: String::new(),
        })
    );
    assert_eq!(err.user_message(), "Failed to update the task status.");
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    let repo = HttpTaskRepository::new(&format!("{}/api/v1/", server.uri())).unwrap();
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    assert!(repo.list_tasks(Filter::All).await.unwrap().is_empty());
}
