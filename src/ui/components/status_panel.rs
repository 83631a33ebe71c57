use eframe::egui;

use crate::ui::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &AppState) {
    ui.heading("Status");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Live channel:");
        if state.live_connected {
            ui.colored_label(egui::Color32::GREEN, "● connected");
        } else {
            ui.colored_label(egui::Color32::RED, "○ disconnected");
        }
    });

    ui.horizontal(|ui| {
        ui.label("Messages:");
        ui.label(format!("{}", state.timeline.len()));
    });

    if let Some(session) = state.session {
        ui.label(format!(
            "Signed in as user {} in room {}",
            session.login_user, session.chatroom_id
        ));
    }

    ui.separator();

    // Thông báo gần đây, mới nhất ở trên
    ui.label("Recent notices:");
    egui::ScrollArea::vertical()
        .id_salt("notices")
        .max_height(200.0)
        .show(ui, |ui| {
            for notice in state.notices.iter().rev().take(20) {
                let time_str = notice.at.format("%H:%M:%S");
                let color = if notice.failure.is_some() {
                    egui::Color32::RED
                } else {
                    egui::Color32::WHITE
                };

                ui.horizontal_wrapped(|ui| {
                    ui.colored_label(color, format!("[{}]", time_str));
                    ui.label(&notice.message);
                });
            }
        });
}
