use std::fmt;

use super::types::{ChatMessage, RoomId, RoomSnapshot, SearchResult, UserId};

/// Sự kiện từ tầng mạng gửi lên UI.
#[derive(Debug, Clone)]
pub enum NetworkEvent {
    RoomLoaded { path: String, snapshot: RoomSnapshot },
    MessageReceived(ChatMessage),
    SearchResults { query: String, results: Vec<SearchResult> },
    FriendAdded { user_id: UserId, name: String },
    GroupChatCreated {
        chatroom_id: RoomId,
        name: String,
        redirect_url: String,
    },
    SingleChatOpened { path: String, name: String },
    LiveChannelConnected,
    /// The socket ended. Không có cơ chế reconnect.
    LiveChannelClosed,
    Failure { action: FailedAction, message: String },
}

/// Which user-visible action failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedAction {
    Search,
    AddFriend,
    FetchRoom,
    CreateGroup,
    OpenChat,
    Connect,
    Send,
    Upload,
    Decode,
}

impl fmt::Display for FailedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailedAction::Search => "search",
            FailedAction::AddFriend => "add friend",
            FailedAction::FetchRoom => "load room",
            FailedAction::CreateGroup => "create group chat",
            FailedAction::OpenChat => "open chat",
            FailedAction::Connect => "connect",
            FailedAction::Send => "send",
            FailedAction::Upload => "upload",
            FailedAction::Decode => "decode",
        };
        f.write_str(label)
    }
}
