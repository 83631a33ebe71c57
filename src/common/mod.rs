pub mod commands;
pub mod events;
pub mod types;

pub use commands::NetworkCommand;
pub use events::{FailedAction, NetworkEvent};
pub use types::{
    ChatContent, ChatMessage, CreateGroupChat, GroupChatCreated, MediaRef, OutboundBody,
    OutboundFrame, RoomId, RoomSnapshot, SearchResponse, SearchResult, Session, UploadedImage,
    User, UserId, Writer,
};
