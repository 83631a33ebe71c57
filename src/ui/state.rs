use std::collections::BTreeSet;

use chrono::{DateTime, Local};

use crate::chat::{RenderOptions, ScrollLatch, Timeline, compose_text, render_message};
use crate::common::{
    ChatMessage, CreateGroupChat, FailedAction, NetworkEvent, OutboundFrame, RoomSnapshot,
    Session, UserId,
};
use crate::friends::FriendDirectory;

const MAX_NOTICES: usize = 100;

/// Thông báo hiển thị cho người dùng (lỗi hoặc thông tin).
#[derive(Debug, Clone)]
pub struct Notice {
    pub at: DateTime<Local>,
    /// `None` for informational notices.
    pub failure: Option<FailedAction>,
    pub message: String,
}

/// A room opened or created during this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEntry {
    pub path: String,
    pub name: String,
}

/// Trạng thái cục bộ của UI.
pub struct AppState {
    pub options: RenderOptions,
    pub session: Option<Session>,
    pub room_path: Option<String>,
    pub timeline: Timeline,
    pub scroll: ScrollLatch,
    /// Offset chosen by the latch, applied on the next paint.
    pub pending_scroll: Option<f32>,
    pub input_text: String,
    pub search_input: String,
    pub directory: FriendDirectory,
    pub group_name: String,
    pub group_members: BTreeSet<UserId>,
    pub rooms: Vec<RoomEntry>,
    pub notices: Vec<Notice>,
    pub live_connected: bool,
}

impl AppState {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            session: None,
            room_path: None,
            timeline: Timeline::default(),
            scroll: ScrollLatch::new(),
            pending_scroll: None,
            input_text: String::new(),
            search_input: String::new(),
            directory: FriendDirectory::default(),
            group_name: String::new(),
            group_members: BTreeSet::new(),
            rooms: Vec::new(),
            notices: Vec::new(),
            live_connected: false,
        }
    }

    pub fn apply_event(&mut self, event: NetworkEvent) {
        match event {
            NetworkEvent::RoomLoaded { path, snapshot } => self.load_room(path, snapshot),
            NetworkEvent::MessageReceived(message) => {
                self.push_message(message);
            }
            NetworkEvent::SearchResults { query, results } => {
                self.directory.apply_results(&query, results);
            }
            NetworkEvent::FriendAdded { user_id, name } => {
                self.directory.mark_friend(user_id, &name);
                self.add_notice(None, format!("Friend request accepted for user {user_id}"));
            }
            NetworkEvent::GroupChatCreated {
                chatroom_id,
                name,
                redirect_url,
            } => {
                self.group_name.clear();
                self.group_members.clear();
                self.register_room(&redirect_url, Some(name));
                self.add_notice(None, format!("Group chat {chatroom_id} created"));
            }
            NetworkEvent::SingleChatOpened { path, name } => self.register_room(&path, Some(name)),
            NetworkEvent::LiveChannelConnected => self.live_connected = true,
            NetworkEvent::LiveChannelClosed => {
                self.live_connected = false;
                self.add_notice(
                    Some(FailedAction::Connect),
                    "Live channel disconnected; new messages will not arrive".to_string(),
                );
            }
            NetworkEvent::Failure { action, message } => {
                log::warn!("{action} failed: {message}");
                self.add_notice(Some(action), format!("Could not {action}: {message}"));
            }
        }
    }

    /// Mở phòng mới: timeline và scroll latch bắt đầu lại từ đầu, rồi render
    /// toàn bộ lịch sử theo đúng thứ tự server trả về.
    pub fn load_room(&mut self, path: String, snapshot: RoomSnapshot) {
        let session = Session::from(&snapshot);
        let mut timeline = Timeline::default();
        for message in &snapshot.chats {
            timeline.append(render_message(message, session.login_user, &self.options));
        }

        self.timeline = timeline;
        self.scroll = ScrollLatch::new();
        self.pending_scroll = None;
        self.session = Some(session);
        self.register_room(&path, None);
        self.room_path = Some(path);
    }

    /// Appends a live message. Returns `false` when it is not for the open room.
    pub fn push_message(&mut self, message: ChatMessage) -> bool {
        let Some(session) = self.session else {
            log::debug!("No room loaded; ignoring live message");
            return false;
        };
        if message
            .chatroom_id
            .is_some_and(|room| room != session.chatroom_id)
        {
            return false;
        }

        self.timeline
            .append(render_message(&message, session.login_user, &self.options));
        true
    }

    /// Runs the scroll latch against the painted content size.
    pub fn observe_scroll(&mut self, content_height: f32, viewport_height: f32) -> Option<f32> {
        let offset = self.scroll.observe(content_height, viewport_height);
        if offset.is_some() {
            self.pending_scroll = offset;
        }
        offset
    }

    /// Composes a text frame from the input box without clearing it.
    pub fn text_frame(&self) -> Option<OutboundFrame> {
        compose_text(&self.input_text, self.session)
    }

    pub fn group_request(&self) -> CreateGroupChat {
        CreateGroupChat {
            name: self.group_name.trim().to_string(),
            member_ids: self.group_members.iter().copied().collect(),
        }
    }

    pub fn register_room(&mut self, path: &str, name: Option<String>) {
        let name = name.filter(|name| !name.is_empty());
        if let Some(entry) = self.rooms.iter_mut().find(|entry| entry.path == path) {
            if let Some(name) = name {
                entry.name = name;
            }
            return;
        }
        self.rooms.push(RoomEntry {
            path: path.to_string(),
            name: name.unwrap_or_else(|| default_room_name(path)),
        });
    }

    pub fn current_room(&self) -> Option<&RoomEntry> {
        let path = self.room_path.as_deref()?;
        self.rooms.iter().find(|entry| entry.path == path)
    }

    pub fn add_notice(&mut self, failure: Option<FailedAction>, message: String) {
        self.notices.push(Notice {
            at: Local::now(),
            failure,
            message,
        });

        // Giữ tối đa 100 thông báo
        if self.notices.len() > MAX_NOTICES {
            self.notices.remove(0);
        }
    }

    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

fn default_room_name(path: &str) -> String {
    match path.trim_end_matches('/').rsplit('/').next() {
        Some(id) if !id.is_empty() => format!("Room {id}"),
        _ => path.to_string(),
    }
}
