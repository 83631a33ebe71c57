use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use room_chat::common::RoomId;
use room_chat::config::{self, AppConfig};
use room_chat::network::ChatClient;
use room_chat::ui::{AppState, ChatApp};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "room_chat",
    version,
    about = "Desktop client for the room chat server"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Base URL of the chat server API
    #[arg(long, env = "ROOM_CHAT_SERVER")]
    server: Option<String>,
    /// Live channel websocket URL
    #[arg(long, env = "ROOM_CHAT_WS")]
    ws: Option<String>,
    /// Value of the server's `session_id` cookie
    #[arg(long, env = "ROOM_CHAT_SESSION")]
    session: Option<String>,
    /// Room to open at startup
    #[arg(long)]
    room: Option<RoomId>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Write the effective configuration to the config path and exit
    InitConfig,
}

impl Cli {
    fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(server) = &self.server {
            config.base_url = server.clone();
        }
        if let Some(ws) = &self.ws {
            config.ws_url = ws.clone();
        }
        if let Some(session) = &self.session {
            config.session_id = Some(session.clone());
        }
        if let Some(room) = self.room {
            config.initial_room = Some(config::room_path(room));
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let app_config = cli.apply_overrides(config::load_config(&cli.config));

    if cli.mode == Some(Mode::InitConfig) {
        match config::save_config(&cli.config, &app_config) {
            Ok(()) => log::info!("Wrote config to {}", cli.config),
            Err(err) => log::error!("Failed to write config {}: {err}", cli.config),
        }
        return Ok(());
    }

    run_full_client(app_config).await
}

async fn run_full_client(app_config: AppConfig) -> Result<(), eframe::Error> {
    // 1. Tạo các kênh giao tiếp (Channels)
    // UI -> Network
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Network -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    // 2. Khởi chạy Network Thread (Chạy ngầm)
    let client = match ChatClient::new(event_tx, cmd_rx, &app_config) {
        Ok(client) => client,
        Err(err) => {
            log::error!("Invalid client configuration: {err}");
            return Ok(());
        }
    };
    tokio::spawn(async move {
        if let Err(err) = client.run().await {
            log::error!("Network client terminated: {err}");
        }
    });

    // 3. Khởi chạy UI (Chạy trên Main Thread)
    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);
    let render_options = app_config.render_options();

    eframe::run_native(
        "Room Chat",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!("Client started against {}", app_config.base_url);

            let state = AppState::new(render_options.clone());
            Ok(Box::new(ChatApp::new(cc, state, cmd_tx.clone(), event_receiver)))
        }),
    )
}
