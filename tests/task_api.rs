use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use taskmaster_server::{
    app_state::{AppState, SharedState},
    authentication::auth,
    data_access::data_context::DataContext,
    map_routes,
    settings::Settings,
    user::User,
    user_add_request::UserAddRequest,
};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

fn test_settings() -> Settings {
    Settings {
        tcp_socket_binding: "127.0.0.1".to_string(),
        tcp_socket_port: 0,
        database_path: String::new(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiration_in_minutes: 60,
        default_admin_username: "admin".to_string(),
        default_admin_password: "adminpassword".to_string(),
        default_admin_email: "admin@localhost".to_string(),
    }
}

fn spawn_app() -> (Router, SharedState, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.redb");
    let settings = test_settings();

    let data_context = DataContext::new(path.to_str().unwrap()).unwrap();
    data_context.ensure_default_user(&settings).unwrap();

    let state: SharedState = Arc::new(AppState { data_context, settings });
    (map_routes(state.clone()), state, dir)
}

fn add_user(state: &SharedState, username: &str, is_superuser: bool) -> User {
    let user = User::new(UserAddRequest {
        username: username.to_string(),
        password: "password".to_string(),
        email: format!("{username}@localhost"),
        is_superuser,
    });
    state.data_context.create_user(&user).unwrap();
    user
}

fn token_for(state: &SharedState, user: &User) -> String {
    auth::create_token(user, &state.settings).unwrap()
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_task(app: &Router, token: &str, title: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/tasks",
        Some(token),
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn login_issues_token_and_rejects_bad_password() {
    let (app, _state, _dir) = spawn_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "adminpassword" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn task_routes_require_authentication() {
    let (app, _state, _dir) = spawn_app();

    let (status, _) = send(&app, Method::GET, "/api/tasks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/tasks", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/health/check_status", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn owner_sees_own_task_others_get_not_found() {
    let (app, state, _dir) = spawn_app();
    let alice = add_user(&state, "alice", false);
    let bob = add_user(&state, "bob", false);
    let admin = state.data_context.get_user_by_username("admin").unwrap().unwrap();

    let alice_token = token_for(&state, &alice);
    let bob_token = token_for(&state, &bob);
    let admin_token = token_for(&state, &admin);

    let created = create_task(&app, &alice_token, "Buy milk").await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["owner"].as_str().unwrap(), alice.id.to_string());

    let (status, listed) = send(&app, Method::GET, "/api/tasks", Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap().clone();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "Buy milk");
    assert_eq!(listed[0]["is_completed"], false);

    // a different non-superuser cannot even learn the task exists
    let uri = format!("/api/tasks/{id}");
    let (status, body) = send(&app, Method::GET, &uri, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task not found.");

    // the superuser can
    let (status, body) = send(&app, Method::GET, &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Buy milk");
}

#[tokio::test]
async fn soft_delete_flow_matches_visibility_rules() {
    let (app, state, _dir) = spawn_app();
    let alice = add_user(&state, "alice", false);
    let token = token_for(&state, &alice);

    let created = create_task(&app, &token, "Disposable").await;
    let uri = format!("/api/tasks/{}", created["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = send(&app, Method::GET, "/api/tasks", Some(&token), None).await;
    assert!(listed.as_array().unwrap().is_empty());

    let (_, listed) = send(
        &app,
        Method::GET,
        "/api/tasks?include_deleted=true",
        Some(&token),
        None,
    )
    .await;
    let listed = listed.as_array().unwrap().clone();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["is_deleted"], true);

    // repeating the delete is not a no-op success
    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task not found.");
}

#[tokio::test]
async fn complete_twice_reports_already_completed() {
    let (app, state, _dir) = spawn_app();
    let alice = add_user(&state, "alice", false);
    let token = token_for(&state, &alice);

    let created = create_task(&app, &token, "Finish me").await;
    let uri = format!("/api/tasks/{}/complete", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PATCH, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task marked as completed.");
    assert_eq!(body["task"]["is_completed"], true);

    let (status, body) = send(&app, Method::PATCH, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Task is already completed.");

    // still completed
    let task_uri = format!("/api/tasks/{}", created["id"].as_str().unwrap());
    let (_, body) = send(&app, Method::GET, &task_uri, Some(&token), None).await;
    assert_eq!(body["is_completed"], true);
}

#[tokio::test]
async fn update_ignores_supplied_owner() {
    let (app, state, _dir) = spawn_app();
    let alice = add_user(&state, "alice", false);
    let token = token_for(&state, &alice);

    let created = create_task(&app, &token, "Mine").await;
    let uri = format!("/api/tasks/{}", created["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({
            "title": "Still mine",
            "is_completed": true,
            "owner": Uuid::new_v4().to_string(),
            "is_deleted": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Still mine");
    assert_eq!(body["is_completed"], true);
    assert_eq!(body["owner"].as_str().unwrap(), alice.id.to_string());
    assert_eq!(body["is_deleted"], false);
}

#[tokio::test]
async fn update_of_foreign_task_is_not_found_and_leaves_it_untouched() {
    let (app, state, _dir) = spawn_app();
    let alice = add_user(&state, "alice", false);
    let bob = add_user(&state, "bob", false);
    let alice_token = token_for(&state, &alice);
    let bob_token = token_for(&state, &bob);

    let created = create_task(&app, &alice_token, "Original").await;
    let uri = format!("/api/tasks/{}", created["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&bob_token),
        Some(json!({ "title": "Hacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, &uri, Some(&alice_token), None).await;
    assert_eq!(body["title"], "Original");
}

#[tokio::test]
async fn create_with_blank_title_is_rejected() {
    let (app, state, _dir) = spawn_app();
    let alice = add_user(&state, "alice", false);
    let token = token_for(&state, &alice);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(&token),
        Some(json!({ "title": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title must not be empty.");
}

#[tokio::test]
async fn superuser_listing_spans_owners() {
    let (app, state, _dir) = spawn_app();
    let alice = add_user(&state, "alice", false);
    let bob = add_user(&state, "bob", false);
    let admin = state.data_context.get_user_by_username("admin").unwrap().unwrap();

    create_task(&app, &token_for(&state, &alice), "alices").await;
    create_task(&app, &token_for(&state, &bob), "bobs").await;

    let (status, listed) = send(
        &app,
        Method::GET,
        "/api/tasks",
        Some(&token_for(&state, &admin)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 2);

    // a regular user only ever sees their own, opt-in or not
    let (_, listed) = send(
        &app,
        Method::GET,
        "/api/tasks?include_deleted=true",
        Some(&token_for(&state, &bob)),
        None,
    )
    .await;
    let listed = listed.as_array().unwrap().clone();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "bobs");
}

#[tokio::test]
async fn user_provisioning_is_superuser_only() {
    let (app, state, _dir) = spawn_app();
    let alice = add_user(&state, "alice", false);
    let admin = state.data_context.get_user_by_username("admin").unwrap().unwrap();

    let payload = json!({
        "username": "carol",
        "password": "password",
        "email": "carol@localhost",
    });

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users/add",
        Some(&token_for(&state, &alice)),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users/add",
        Some(&token_for(&state, &admin)),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, users) = send(
        &app,
        Method::GET,
        "/api/users/get_all",
        Some(&token_for(&state, &admin)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn user_lookup_distinguishes_found_from_missing() {
    let (app, state, _dir) = spawn_app();
    let alice = add_user(&state, "alice", false);
    let admin = state.data_context.get_user_by_username("admin").unwrap().unwrap();
    let admin_token = token_for(&state, &admin);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/users/get?id={}", alice.id),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/users/get?id={}", Uuid::new_v4()),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_check_answers_behind_auth() {
    let (app, state, _dir) = spawn_app();
    let alice = add_user(&state, "alice", false);

    let (status, _) = send(
        &app,
        Method::GET,
        "/health/check_status",
        Some(&token_for(&state, &alice)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
