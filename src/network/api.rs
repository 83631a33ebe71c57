use std::path::Path;

use reqwest::header::COOKIE;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use url::Url;

use crate::common::{
    CreateGroupChat, GroupChatCreated, RoomSnapshot, SearchResponse, SearchResult, UploadedImage,
    UserId,
};
use crate::error::{ClientError, Result};

const ROOM_PREFIX: &str = "/chatrooms/";

/// Request/response side of the chat server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session_id: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, session_id: Option<String>) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
            session_id,
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(session_id) = &self.session_id {
            builder = builder.header(COOKIE, format!("session_id={session_id}"));
        }
        Ok(builder)
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<SearchResult>> {
        let response: SearchResponse = self
            .request(Method::GET, "/users")?
            .query(&[("query", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.result)
    }

    pub async fn add_friend(&self, user_id: UserId) -> Result<()> {
        self.request(Method::POST, &format!("/friends/{user_id}"))?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Historical batch for a room path such as `/chatrooms/3`.
    pub async fn fetch_room(&self, room_path: &str) -> Result<RoomSnapshot> {
        let path = format!("{}/chats", room_path.trim_end_matches('/'));
        let snapshot = self
            .request(Method::GET, &path)?
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(snapshot)
    }

    pub async fn create_group_chat(&self, request: &CreateGroupChat) -> Result<GroupChatCreated> {
        let created = self
            .request(Method::POST, "/groupchat")?
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(created)
    }

    /// Multipart upload; the returned id is what image frames reference.
    pub async fn upload_image(&self, path: &Path) -> Result<UploadedImage> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        log::debug!("Uploading {} ({mime}, {} bytes)", path.display(), bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.as_ref())?;
        let image = self
            .request(Method::POST, "/images")?
            .multipart(Form::new().part("file", part))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(image)
    }

    /// Server tạo hoặc tìm phòng 1:1 rồi redirect về `/chatrooms/{id}`.
    pub async fn open_single_chat(&self, friend_id: UserId) -> Result<String> {
        let response = self
            .request(Method::GET, &format!("/single-chats/{friend_id}"))?
            .send()
            .await?
            .error_for_status()?;
        let path = response.url().path().to_string();
        if path.starts_with(ROOM_PREFIX) {
            Ok(path)
        } else {
            Err(ClientError::UnexpectedRedirect(path))
        }
    }
}
