use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("live channel error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("session id is not a valid cookie value")]
    InvalidSession,
    #[error("live channel is not connected")]
    NotConnected,
    #[error("server redirected to unexpected location `{0}`")]
    UnexpectedRedirect(String),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
