//! End-to-end startup tests: config → file database → listener → shutdown.

use std::sync::Arc;

use todo_service::api::{self, AppState};
use todo_service::config::GlobalConfig;
use todo_service::models::todo::TodoResponse;
use todo_service::persistence::db;
use todo_service::persistence::todo_repo::TodoRepo;

use super::test_helpers::spawn_server;

fn file_config(dir: &std::path::Path) -> GlobalConfig {
    let toml = format!(
        r#"
database_url = 'sqlite://{path}'
http_host = "127.0.0.1"
http_port = 0
max_connections = 4
"#,
        path = dir.join("todos.db").display(),
    );
    GlobalConfig::from_toml_str(&toml).expect("valid test config")
}

#[tokio::test]
async fn full_crud_cycle_over_http() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = file_config(temp.path());
    let pool = Arc::new(
        db::connect(&config.database_url, config.max_connections)
            .await
            .expect("connect"),
    );
    let server = spawn_server(AppState::new(Arc::new(TodoRepo::new(Arc::clone(&pool))))).await;
    let client = reqwest::Client::new();
    let todos_url = format!("{}/todos", server.base_url);

    let resp = client
        .post(&todos_url)
        .json(&serde_json::json!({ "title": "A" }))
        .send()
        .await
        .expect("POST");
    assert_eq!(resp.status(), 201);
    let created: TodoResponse = resp.json().await.expect("json");
    assert_eq!(created.title, "A");
    assert_eq!(created.description, None);
    assert!(!created.completed);

    let listed: Vec<TodoResponse> = client
        .get(&todos_url)
        .send()
        .await
        .expect("GET list")
        .json()
        .await
        .expect("json");
    assert!(listed.iter().any(|t| t.id == created.id));

    let item_url = format!("{todos_url}/{}", created.id);
    let fetched: TodoResponse = client
        .get(&item_url)
        .send()
        .await
        .expect("GET item")
        .json()
        .await
        .expect("json");
    assert_eq!(fetched, created);

    let resp = client.delete(&item_url).send().await.expect("DELETE");
    assert_eq!(resp.status(), 200);

    let resp = client.get(&item_url).send().await.expect("GET item");
    assert_eq!(resp.status(), 404);

    server.ct.cancel();
    server
        .handle
        .await
        .expect("join")
        .expect("server exits cleanly");
    pool.close().await;
}

#[tokio::test]
async fn data_survives_reconnect() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = file_config(temp.path());

    let pool = Arc::new(db::connect(&config.database_url, 2).await.expect("connect"));
    let created = TodoRepo::new(Arc::clone(&pool))
        .insert(&todo_service::models::todo::TodoInput::titled("persisted"))
        .await
        .expect("insert");
    pool.close().await;

    let pool = Arc::new(db::connect(&config.database_url, 2).await.expect("reconnect"));
    let fetched = TodoRepo::new(Arc::clone(&pool))
        .get_by_id(created.id)
        .await
        .expect("get");
    assert_eq!(fetched, Some(created));
    pool.close().await;
}

#[tokio::test]
async fn bind_uses_configured_address() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = file_config(temp.path());

    let listener = api::bind(&config).await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    assert!(addr.ip().is_loopback());
    assert_ne!(addr.port(), 0);
}

#[tokio::test]
async fn malformed_database_url_fails_before_serving() {
    let err = db::connect("file:todos.db", 1).await.expect_err("should fail");
    assert!(matches!(err, todo_service::AppError::Config(_)));
}
