use eframe::egui;

use crate::common::CreateGroupChat;
use crate::ui::state::AppState;

/// Form tạo group chat. Returns the request when the user submits it.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> Option<CreateGroupChat> {
    ui.heading("New group chat");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Name:");
        ui.text_edit_singleline(&mut state.group_name);
    });

    ui.label("Members:");
    if !state.directory.has_friends() {
        ui.label(egui::RichText::new("No friends yet").weak());
    }
    for (friend_id, name) in state.directory.friends() {
        let mut checked = state.group_members.contains(&friend_id);
        if ui.checkbox(&mut checked, name).changed() {
            if checked {
                state.group_members.insert(friend_id);
            } else {
                state.group_members.remove(&friend_id);
            }
        }
    }

    if ui.button("Create").clicked() {
        return Some(state.group_request());
    }
    None
}
