use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::chat::{Meridiem, RenderOptions};
use crate::common::RoomId;

pub const DEFAULT_CONFIG_PATH: &str = "config/client.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base of the request/response API.
    pub base_url: String,
    /// Live channel endpoint.
    pub ws_url: String,
    /// Media path; relative values are resolved against `base_url`.
    pub media_base: String,
    /// Value of the `session_id` cookie issued by the server's login page.
    pub session_id: Option<String>,
    /// Room path opened at startup, e.g. `/chatrooms/1`.
    pub initial_room: Option<String>,
    pub meridiem: Meridiem,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            ws_url: "ws://localhost:8000/ws/connect".to_string(),
            media_base: "/images".to_string(),
            session_id: None,
            initial_room: None,
            meridiem: Meridiem::default(),
        }
    }
}

impl AppConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            media_base: self.resolved_media_base(),
            meridiem: self.meridiem.clone(),
        }
    }

    fn resolved_media_base(&self) -> String {
        match Url::parse(&self.base_url).and_then(|base| base.join(&self.media_base)) {
            Ok(url) => url.to_string(),
            Err(err) => {
                log::warn!(
                    "Cannot resolve media base `{}` against `{}`: {err}",
                    self.media_base,
                    self.base_url
                );
                self.media_base.clone()
            }
        }
    }
}

pub fn room_path(room_id: RoomId) -> String {
    format!("/chatrooms/{room_id}")
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}
