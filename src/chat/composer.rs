use crate::common::{OutboundBody, OutboundFrame, Session};

/// Builds a text frame from the input box. Blank input, or no room loaded yet,
/// sends nothing.
pub fn compose_text(input: &str, session: Option<Session>) -> Option<OutboundFrame> {
    if input.trim().is_empty() {
        return None;
    }
    let session = session?;
    Some(OutboundFrame {
        writer_id: session.login_user,
        chatroom_id: session.chatroom_id,
        body: OutboundBody::Text {
            text: input.to_string(),
        },
    })
}

pub fn image_frame(session: Session, image_id: i64) -> OutboundFrame {
    OutboundFrame {
        writer_id: session.login_user,
        chatroom_id: session.chatroom_id,
        body: OutboundBody::Image { image_id },
    }
}
