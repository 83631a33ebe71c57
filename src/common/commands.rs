use std::path::PathBuf;

use super::types::{CreateGroupChat, OutboundFrame, Session, UserId};

/// Lệnh UI gửi xuống tầng mạng.
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Load a room's historical batch. `path` is the room path, e.g. `/chatrooms/3`.
    OpenRoom { path: String },
    /// Transmit an already composed frame over the live channel.
    SendFrame(OutboundFrame),
    /// Upload a file first, then send an image frame referencing it.
    SendImage { path: PathBuf, session: Session },
    SearchUsers { query: String },
    /// `name` is kept so the friend list can be updated on acknowledgement.
    AddFriend { user_id: UserId, name: String },
    CreateGroupChat(CreateGroupChat),
    /// Open (or create) the 1:1 room with a friend.
    OpenSingleChat { friend_id: UserId, name: String },
}
