use std::path::Path;

use tokio::sync::mpsc;

use crate::chat::image_frame;
use crate::common::{
    ChatMessage, CreateGroupChat, FailedAction, NetworkCommand, NetworkEvent, OutboundFrame,
    Session, UserId,
};
use crate::config::AppConfig;
use crate::error::{ClientError, Result};

use super::api::ApiClient;
use super::channel::LiveChannel;

/// Network task: owns the API client and the live channel, one command or one
/// inbound frame at a time.
pub struct ChatClient {
    event_sender: mpsc::Sender<NetworkEvent>,
    command_receiver: mpsc::Receiver<NetworkCommand>,
    api: ApiClient,
    ws_url: String,
    session_id: Option<String>,
    initial_room: Option<String>,
}

impl ChatClient {
    pub fn new(
        event_sender: mpsc::Sender<NetworkEvent>,
        command_receiver: mpsc::Receiver<NetworkCommand>,
        config: &AppConfig,
    ) -> Result<Self> {
        Ok(Self {
            event_sender,
            command_receiver,
            api: ApiClient::new(&config.base_url, config.session_id.clone())?,
            ws_url: config.ws_url.clone(),
            session_id: config.session_id.clone(),
            initial_room: config.initial_room.clone(),
        })
    }

    pub async fn run(mut self) -> Result<()> {
        // Lịch sử phòng đầu tiên được render trước mọi frame từ live channel.
        if let Some(path) = self.initial_room.take() {
            self.open_room(path).await;
        }

        let mut channel = match LiveChannel::connect(&self.ws_url, self.session_id.as_deref()).await
        {
            Ok(channel) => {
                self.emit(NetworkEvent::LiveChannelConnected).await;
                Some(channel)
            }
            Err(err) => {
                log::error!("Failed to connect live channel {}: {err}", self.ws_url);
                self.fail(FailedAction::Connect, &err).await;
                None
            }
        };

        log::info!("Network event loop started");

        loop {
            tokio::select! {
                command = self.command_receiver.recv() => {
                    match command {
                        Some(command) => self.handle_command(command, &mut channel).await,
                        None => break,
                    }
                }
                frame = next_live_message(&mut channel) => {
                    self.handle_live_message(frame, &mut channel).await;
                }
            }
        }

        log::info!("Command channel closed; network loop stopping");
        Ok(())
    }

    async fn handle_command(&mut self, command: NetworkCommand, channel: &mut Option<LiveChannel>) {
        match command {
            NetworkCommand::OpenRoom { path } => self.open_room(path).await,
            NetworkCommand::SendFrame(frame) => self.send_frame(&frame, channel).await,
            NetworkCommand::SendImage { path, session } => {
                self.send_image(&path, session, channel).await
            }
            NetworkCommand::SearchUsers { query } => match self.api.search_users(&query).await {
                Ok(results) => {
                    self.emit(NetworkEvent::SearchResults { query, results })
                        .await
                }
                Err(err) => self.fail(FailedAction::Search, &err).await,
            },
            NetworkCommand::AddFriend { user_id, name } => match self.api.add_friend(user_id).await {
                Ok(()) => {
                    log::info!("Friend {user_id} added");
                    self.emit(NetworkEvent::FriendAdded { user_id, name }).await;
                }
                Err(err) => self.fail(FailedAction::AddFriend, &err).await,
            },
            NetworkCommand::CreateGroupChat(request) => self.create_group_chat(request).await,
            NetworkCommand::OpenSingleChat { friend_id, name } => {
                self.open_single_chat(friend_id, name).await
            }
        }
    }

    async fn handle_live_message(
        &mut self,
        frame: Option<Result<ChatMessage>>,
        channel: &mut Option<LiveChannel>,
    ) {
        match frame {
            Some(Ok(message)) => self.emit(NetworkEvent::MessageReceived(message)).await,
            Some(Err(ClientError::Decode(err))) => {
                log::warn!("Dropping malformed live frame: {err}");
                self.emit(NetworkEvent::Failure {
                    action: FailedAction::Decode,
                    message: err.to_string(),
                })
                .await;
            }
            Some(Err(err)) => {
                log::error!("Live channel failed: {err}");
                *channel = None;
                self.emit(NetworkEvent::LiveChannelClosed).await;
            }
            None => {
                log::warn!("Live channel ended; no further messages will arrive");
                *channel = None;
                self.emit(NetworkEvent::LiveChannelClosed).await;
            }
        }
    }

    async fn open_room(&mut self, path: String) {
        match self.api.fetch_room(&path).await {
            Ok(snapshot) => {
                log::info!(
                    "Loaded room {} with {} messages",
                    snapshot.chatroom_id,
                    snapshot.chats.len()
                );
                self.emit(NetworkEvent::RoomLoaded { path, snapshot }).await;
            }
            Err(err) => self.fail(FailedAction::FetchRoom, &err).await,
        }
    }

    async fn send_frame(&mut self, frame: &OutboundFrame, channel: &mut Option<LiveChannel>) {
        let result = match channel.as_mut() {
            Some(channel) => channel.send(frame).await,
            None => Err(ClientError::NotConnected),
        };
        if let Err(err) = result {
            log::warn!("Failed to send frame: {err}");
            self.fail(FailedAction::Send, &err).await;
        }
    }

    async fn send_image(
        &mut self,
        path: &Path,
        session: Session,
        channel: &mut Option<LiveChannel>,
    ) {
        match self.api.upload_image(path).await {
            Ok(image) => {
                log::info!("Uploaded {} as image {}", path.display(), image.id);
                self.send_frame(&image_frame(session, image.id), channel)
                    .await;
            }
            Err(err) => {
                log::warn!("Upload of {} failed: {err}", path.display());
                self.fail(FailedAction::Upload, &err).await;
            }
        }
    }

    async fn create_group_chat(&mut self, request: CreateGroupChat) {
        match self.api.create_group_chat(&request).await {
            Ok(created) => {
                let redirect_url = created.redirect_url.clone();
                self.emit(NetworkEvent::GroupChatCreated {
                    chatroom_id: created.chatroom_id,
                    name: request.name,
                    redirect_url: created.redirect_url,
                })
                .await;
                self.open_room(redirect_url).await;
            }
            Err(err) => self.fail(FailedAction::CreateGroup, &err).await,
        }
    }

    async fn open_single_chat(&mut self, friend_id: UserId, name: String) {
        match self.api.open_single_chat(friend_id).await {
            Ok(path) => {
                self.emit(NetworkEvent::SingleChatOpened {
                    path: path.clone(),
                    name,
                })
                .await;
                self.open_room(path).await;
            }
            Err(err) => self.fail(FailedAction::OpenChat, &err).await,
        }
    }

    async fn fail(&self, action: FailedAction, err: &ClientError) {
        self.emit(NetworkEvent::Failure {
            action,
            message: err.to_string(),
        })
        .await;
    }

    async fn emit(&self, event: NetworkEvent) {
        if let Err(err) = self.event_sender.send(event).await {
            log::warn!("Failed to notify UI: {err:?}");
        }
    }
}

async fn next_live_message(
    channel: &mut Option<LiveChannel>,
) -> Option<Result<ChatMessage>> {
    match channel {
        Some(channel) => channel.next_message().await,
        None => std::future::pending().await,
    }
}
