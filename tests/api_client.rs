use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::{Multipart, Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Json, Router};
use room_chat::common::CreateGroupChat;
use room_chat::error::ClientError;
use room_chat::network::ApiClient;
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get("cookie")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("session_id=s3cret"))
}

async fn search(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    if !has_session(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let query = params.get("query").cloned().unwrap_or_default();
    let result = if query == "nobody" {
        json!([])
    } else {
        json!([
            {"user": {"id": 42, "name": format!("{query}-1"), "login_id": "x"}, "is_friend": false},
            {"user": {"id": 43, "name": format!("{query}-2")}, "is_friend": true}
        ])
    };
    Ok(Json(json!({ "result": result })))
}

async fn add_friend(Path(id): Path<i64>) -> StatusCode {
    if id == 42 {
        StatusCode::CREATED
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn group_chat(Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body["name"], "study");
    assert_eq!(body["member_ids"], json!([2, 5]));
    Json(json!({"chatroom_id": 31, "redirect_url": "/chatrooms/31"}))
}

async fn upload(mut multipart: Multipart) -> Result<Json<Value>, StatusCode> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        if content_type != "image/png" || bytes.as_ref() != b"png-bytes" {
            return Err(StatusCode::BAD_REQUEST);
        }
        return Ok(Json(
            json!({"id": 77, "name": file_name, "image_name": "stored.png"}),
        ));
    }
    Err(StatusCode::BAD_REQUEST)
}

fn router() -> Router {
    Router::new()
        .route("/users", get(search))
        .route("/friends/{id}", post(add_friend))
        .route("/groupchat", post(group_chat))
        .route("/images", post(upload))
        .route(
            "/single-chats/{id}",
            get(|Path(id): Path<i64>| async move {
                if id == 8 {
                    Redirect::to("/chatrooms/9")
                } else {
                    Redirect::to("/login")
                }
            }),
        )
        .route("/chatrooms/9", get(|| async { "room page" }))
        .route("/login", get(|| async { "login page" }))
}

async fn client() -> ApiClient {
    let addr = spawn_server(router()).await;
    ApiClient::new(&format!("http://{addr}"), Some("s3cret".to_string())).unwrap()
}

#[tokio::test]
async fn search_forwards_query_and_session() {
    let api = client().await;

    let results = api.search_users("park").await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].user.id, 42);
    assert_eq!(results[0].user.name, "park-1");
    assert!(results[1].is_friend);

    assert!(api.search_users("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_without_session_fails() {
    let addr = spawn_server(router()).await;
    let api = ApiClient::new(&format!("http://{addr}"), None).unwrap();
    assert!(matches!(
        api.search_users("park").await,
        Err(ClientError::Http(_))
    ));
}

#[tokio::test]
async fn add_friend_reports_server_errors() {
    let api = client().await;
    api.add_friend(42).await.unwrap();
    assert!(api.add_friend(13).await.is_err());
}

#[tokio::test]
async fn group_chat_returns_redirect() {
    let api = client().await;
    let created = api
        .create_group_chat(&CreateGroupChat {
            name: "study".to_string(),
            member_ids: vec![2, 5],
        })
        .await
        .unwrap();
    assert_eq!(created.chatroom_id, 31);
    assert_eq!(created.redirect_url, "/chatrooms/31");
}

#[tokio::test]
async fn upload_sends_multipart_file() {
    let api = client().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cat.png");
    std::fs::write(&path, b"png-bytes").unwrap();

    let image = api.upload_image(&path).await.unwrap();
    assert_eq!(image.id, 77);
    assert_eq!(image.name, "cat.png");
}

#[tokio::test]
async fn upload_of_missing_file_fails_locally() {
    let api = client().await;
    let result = api
        .upload_image(std::path::Path::new("/definitely/not/here.png"))
        .await;
    assert!(matches!(result, Err(ClientError::Io(_))));
}

#[tokio::test]
async fn single_chat_follows_redirect_to_room() {
    let api = client().await;
    assert_eq!(api.open_single_chat(8).await.unwrap(), "/chatrooms/9");
    assert!(matches!(
        api.open_single_chat(3).await,
        Err(ClientError::UnexpectedRedirect(path)) if path == "/login"
    ));
}
