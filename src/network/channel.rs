use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::COOKIE;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::common::{ChatMessage, OutboundFrame};
use crate::error::{ClientError, Result};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Kết nối websocket duy nhất cho cả phiên làm việc.
pub struct LiveChannel {
    sink: SplitSink<WsStream, Message>,
    stream: SplitStream<WsStream>,
}

impl LiveChannel {
    pub async fn connect(ws_url: &str, session_id: Option<&str>) -> Result<Self> {
        let mut request = ws_url.into_client_request()?;
        if let Some(session_id) = session_id {
            let cookie = HeaderValue::from_str(&format!("session_id={session_id}"))
                .map_err(|_| ClientError::InvalidSession)?;
            request.headers_mut().insert(COOKIE, cookie);
        }

        let (socket, _) = connect_async(request).await?;
        log::info!("Live channel connected to {ws_url}");
        let (sink, stream) = socket.split();
        Ok(Self { sink, stream })
    }

    pub async fn send(&mut self, frame: &OutboundFrame) -> Result<()> {
        let payload = serde_json::to_string(frame)?;
        self.sink.send(Message::Text(payload)).await?;
        Ok(())
    }

    /// Next decoded chat frame. `None` once the socket is closed.
    ///
    /// Control frames are skipped; a frame that fails to decode is returned as
    /// an error and the stream stays usable.
    pub async fn next_message(&mut self) -> Option<Result<ChatMessage>> {
        while let Some(frame) = self.stream.next().await {
            match frame {
                Ok(Message::Text(text)) => return Some(decode_frame(text.as_bytes())),
                Ok(Message::Binary(bytes)) => return Some(decode_frame(&bytes)),
                Ok(Message::Close(reason)) => {
                    log::info!("Live channel closed by server: {reason:?}");
                    return None;
                }
                Ok(_) => continue,
                Err(err) => return Some(Err(err.into())),
            }
        }
        None
    }
}

pub fn decode_frame(payload: &[u8]) -> Result<ChatMessage> {
    Ok(serde_json::from_slice(payload)?)
}
