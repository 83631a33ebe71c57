use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{FailedAction, NetworkCommand, NetworkEvent};

use super::components::{
    chat_area, group_chat,
    input_bar::{self, InputActions},
    sidebar::{self, SidebarActions},
    status_panel,
};
use super::state::AppState;

const MEDIA_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "mp4", "webm"];

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<NetworkCommand>,
    event_receiver: mpsc::Receiver<NetworkEvent>,
}

impl ChatApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        state: AppState,
        command_sender: mpsc::Sender<NetworkCommand>,
        event_receiver: mpsc::Receiver<NetworkEvent>,
    ) -> Self {
        install_media_loaders(&cc.egui_ctx);
        Self::from_parts(state, command_sender, event_receiver)
    }

    fn from_parts(
        state: AppState,
        command_sender: mpsc::Sender<NetworkCommand>,
        event_receiver: mpsc::Receiver<NetworkEvent>,
    ) -> Self {
        Self {
            state,
            command_sender,
            event_receiver,
        }
    }

    fn handle_network_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.apply_event(event);
        }
    }

    /// Returns `false` when the network task did not accept the command.
    fn send_command(&mut self, command: NetworkCommand) -> bool {
        match self.command_sender.try_send(command) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to send command to network: {err}");
                self.state
                    .add_notice(Some(FailedAction::Send), format!("Network busy: {err}"));
                false
            }
        }
    }

    fn handle_sidebar(&mut self, actions: SidebarActions) {
        if let Some(query) = actions.search_query {
            self.send_command(NetworkCommand::SearchUsers { query });
        }
        if let Some((user_id, name)) = actions.add_friend {
            self.send_command(NetworkCommand::AddFriend { user_id, name });
        }
        if let Some((friend_id, name)) = actions.open_chat {
            self.send_command(NetworkCommand::OpenSingleChat { friend_id, name });
        }
        if let Some(path) = actions.open_room {
            self.send_command(NetworkCommand::OpenRoom { path });
        }
    }

    fn handle_input(&mut self, actions: InputActions) {
        if actions.send_text {
            self.send_text();
        }
        if actions.pick_image {
            self.pick_image();
        }
    }

    // Ô nhập chỉ được xoá khi lệnh đã vào hàng đợi
    fn send_text(&mut self) {
        let Some(frame) = self.state.text_frame() else {
            return;
        };
        if self.send_command(NetworkCommand::SendFrame(frame)) {
            self.state.input_text.clear();
        }
    }

    fn pick_image(&mut self) {
        let Some(session) = self.state.session else {
            self.state.add_notice(
                Some(FailedAction::Upload),
                "Open a room before sending images".to_string(),
            );
            return;
        };

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images / videos", &MEDIA_EXTENSIONS)
            .pick_file()
        {
            self.send_command(NetworkCommand::SendImage { path, session });
        }
    }
}

/// Image messages are drawn from their `http(s)://` source, which needs the
/// egui_extras loaders.
pub fn install_media_loaders(ctx: &egui::Context) {
    egui_extras::install_image_loaders(ctx);
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_events();

        egui::SidePanel::left("room_sidebar")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                let actions = sidebar::render(ui, &mut self.state);
                self.handle_sidebar(actions);
            });

        egui::SidePanel::right("status_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                if let Some(request) = group_chat::render(ui, &mut self.state) {
                    self.send_command(NetworkCommand::CreateGroupChat(request));
                }
                ui.add_space(12.0);
                status_panel::render(ui, &self.state);
            });

        egui::TopBottomPanel::bottom("input_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            let actions = input_bar::render(ui, &mut self.state.input_text);
            self.handle_input(actions);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let title = self
                .state
                .current_room()
                .map(|room| room.name.clone())
                .unwrap_or_else(|| "Room Chat".to_string());
            ui.heading(title);
            if let Some(notice) = self.state.latest_notice().filter(|n| n.failure.is_some()) {
                ui.colored_label(egui::Color32::LIGHT_RED, &notice.message);
            }
            ui.separator();
            chat_area::render(ui, &mut self.state);
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
