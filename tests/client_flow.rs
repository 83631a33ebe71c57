use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::Multipart;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use room_chat::chat::{FragmentBody, Side};
use room_chat::common::{ChatContent, FailedAction, NetworkCommand, NetworkEvent, Session};
use room_chat::config::AppConfig;
use room_chat::network::ChatClient;
use room_chat::ui::AppState;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;

async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn chat(writer_id: i64, name: &str, text: &str) -> Value {
    json!({
        "id": 1,
        "writer_id": writer_id,
        "writer": {"id": writer_id, "name": name},
        "chatroom_id": 1,
        "time": "2024-05-01T13:05:00",
        "chat_type": "text",
        "text": text
    })
}

async fn history() -> Json<Value> {
    Json(json!({
        "login_user": 1,
        "chatroom_id": 1,
        "chats": [chat(1, "alice", "hello"), chat(2, "bob", "hey")]
    }))
}

async fn upload(mut multipart: Multipart) -> Json<Value> {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let _ = field.bytes().await.unwrap();
    }
    Json(json!({"id": 77, "name": "cat.png", "image_name": "stored.png"}))
}

async fn live(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(serve_socket)
}

/// Greets with one message from bob, then echoes every frame back as alice.
async fn serve_socket(mut socket: WebSocket) {
    let greeting = chat(2, "bob", "welcome").to_string();
    if socket.send(Message::Text(greeting.into())).await.is_err() {
        return;
    }

    while let Some(Ok(message)) = socket.recv().await {
        let Message::Text(text) = message else {
            continue;
        };
        let frame: Value = serde_json::from_str(text.as_str()).unwrap();
        let mut echo = json!({
            "writer_id": frame["writer_id"],
            "writer": {"id": frame["writer_id"], "name": "alice"},
            "chatroom_id": frame["chatroom_id"],
            "time": "2024-05-01T13:06:00",
            "chat_type": frame["chat_type"],
        });
        if frame["chat_type"] == "image" {
            echo["image"] = json!({"id": frame["image_id"], "name": "cat.png", "image_name": "stored.png"});
        } else {
            echo["text"] = frame["text"].clone();
        }
        if socket
            .send(Message::Text(echo.to_string().into()))
            .await
            .is_err()
        {
            return;
        }
    }
}

async fn next_event(events: &mut mpsc::Receiver<NetworkEvent>) -> NetworkEvent {
    timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("timed out waiting for network event")
        .expect("network task stopped")
}

#[tokio::test]
async fn history_then_live_then_echo() {
    let router = Router::new()
        .route("/chatrooms/1/chats", get(history))
        .route("/images", post(upload))
        .route("/ws/connect", get(live));
    let addr = spawn_server(router).await;

    let config = AppConfig {
        base_url: format!("http://{addr}"),
        ws_url: format!("ws://{addr}/ws/connect"),
        initial_room: Some("/chatrooms/1".to_string()),
        ..AppConfig::default()
    };
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (event_tx, mut events) = mpsc::channel(16);
    let client = ChatClient::new(event_tx, cmd_rx, &config).unwrap();
    let task = tokio::spawn(client.run());
    let mut state = AppState::new(config.render_options());

    let loaded = next_event(&mut events).await;
    assert!(matches!(loaded, NetworkEvent::RoomLoaded { .. }));
    state.apply_event(loaded);
    assert_eq!(state.timeline.len(), 2);

    let connected = next_event(&mut events).await;
    assert!(matches!(connected, NetworkEvent::LiveChannelConnected));
    state.apply_event(connected);

    let greeting = next_event(&mut events).await;
    assert!(matches!(greeting, NetworkEvent::MessageReceived(_)));
    state.apply_event(greeting);

    state.input_text = "hi there".to_string();
    let frame = state.text_frame().expect("room is loaded");
    cmd_tx.send(NetworkCommand::SendFrame(frame)).await.unwrap();
    let echo = next_event(&mut events).await;
    state.apply_event(echo);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cat.png");
    std::fs::write(&path, b"png").unwrap();
    cmd_tx
        .send(NetworkCommand::SendImage {
            path,
            session: state.session.unwrap(),
        })
        .await
        .unwrap();
    let image_echo = next_event(&mut events).await;
    match &image_echo {
        NetworkEvent::MessageReceived(message) => {
            assert!(matches!(message.content, ChatContent::Image { .. }))
        }
        other => panic!("expected image echo, got {other:?}"),
    }
    state.apply_event(image_echo);

    let sides: Vec<_> = state
        .timeline
        .fragments()
        .iter()
        .map(|fragment| fragment.side)
        .collect();
    assert_eq!(
        sides,
        vec![Side::Mine, Side::Other, Side::Other, Side::Mine, Side::Mine]
    );
    assert_eq!(
        state.timeline.fragments()[3].body,
        FragmentBody::Text {
            lines: vec!["hi there".to_string()]
        }
    );
    assert!(matches!(
        state.timeline.fragments()[4].body,
        FragmentBody::Image(_)
    ));
    assert!(state.live_connected);

    drop(cmd_tx);
    let result = timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn failures_surface_without_transmitting() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed_addr = listener.local_addr().unwrap();
    drop(listener);

    let config = AppConfig {
        base_url: format!("http://{closed_addr}"),
        ws_url: format!("ws://{closed_addr}/ws/connect"),
        ..AppConfig::default()
    };
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (event_tx, mut events) = mpsc::channel(16);
    let client = ChatClient::new(event_tx, cmd_rx, &config).unwrap();
    let task = tokio::spawn(client.run());

    assert!(matches!(
        next_event(&mut events).await,
        NetworkEvent::Failure {
            action: FailedAction::Connect,
            ..
        }
    ));

    let session = Session {
        login_user: 1,
        chatroom_id: 1,
    };
    cmd_tx
        .send(NetworkCommand::SendImage {
            path: "/definitely/not/here.png".into(),
            session,
        })
        .await
        .unwrap();
    assert!(matches!(
        next_event(&mut events).await,
        NetworkEvent::Failure {
            action: FailedAction::Upload,
            ..
        }
    ));

    cmd_tx
        .send(NetworkCommand::SearchUsers {
            query: "kim".to_string(),
        })
        .await
        .unwrap();
    assert!(matches!(
        next_event(&mut events).await,
        NetworkEvent::Failure {
            action: FailedAction::Search,
            ..
        }
    ));

    // No image frame was attempted after the failed upload.
    assert!(
        timeout(Duration::from_millis(200), events.recv())
            .await
            .is_err()
    );

    drop(cmd_tx);
    assert!(task.await.unwrap().is_ok());
}
