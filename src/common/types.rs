use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type RoomId = i64;

/// Người gửi tin nhắn, server trả về cả object user nhưng client chỉ cần id + tên.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Writer {
    pub id: UserId,
    pub name: String,
}

/// Ảnh hoặc video đã được lưu trên server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: i64,
    /// Original file name as uploaded.
    #[serde(default)]
    pub name: String,
    /// Name under the media base path.
    pub image_name: String,
}

/// Nội dung tin nhắn, phân loại theo `chat_type` trên wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "chat_type", rename_all = "lowercase")]
pub enum ChatContent {
    Text { text: String },
    Image { image: MediaRef },
    Video { image: MediaRef },
}

/// Domain model đại diện một tin nhắn chat.
///
/// Used for both the historical batch and frames pushed over the live channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: Option<i64>,
    pub writer_id: UserId,
    pub writer: Writer,
    #[serde(default)]
    pub chatroom_id: Option<RoomId>,
    #[serde(default)]
    pub time: String,
    #[serde(flatten)]
    pub content: ChatContent,
}

/// Response of `GET {room}/chats`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomSnapshot {
    pub login_user: UserId,
    pub chatroom_id: RoomId,
    #[serde(default)]
    pub chats: Vec<ChatMessage>,
}

/// Identity of the open room: who we are and where we write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub login_user: UserId,
    pub chatroom_id: RoomId,
}

impl From<&RoomSnapshot> for Session {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            login_user: snapshot.login_user,
            chatroom_id: snapshot.chatroom_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub user: User,
    pub is_friend: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub result: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateGroupChat {
    pub name: String,
    pub member_ids: Vec<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupChatCreated {
    pub chatroom_id: RoomId,
    pub redirect_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedImage {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image_name: String,
}

/// Frame gửi lên live channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundFrame {
    pub writer_id: UserId,
    pub chatroom_id: RoomId,
    #[serde(flatten)]
    pub body: OutboundBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "chat_type", rename_all = "lowercase")]
pub enum OutboundBody {
    Text { text: String },
    Image { image_id: i64 },
}
