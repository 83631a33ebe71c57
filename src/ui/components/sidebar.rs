use crate::friends::SearchFragment;
use crate::ui::state::AppState;
use eframe::egui;

#[derive(Default)]
pub struct SidebarActions {
    pub search_query: Option<String>,
    pub add_friend: Option<(i64, String)>,
    pub open_chat: Option<(i64, String)>,
    pub open_room: Option<String>,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> SidebarActions {
    let mut actions = SidebarActions::default();

    ui.heading("Rooms");
    ui.separator();

    if state.rooms.is_empty() {
        ui.label("No rooms opened yet");
    } else {
        let current = state.room_path.clone();
        for room in &state.rooms {
            let selected = current.as_deref() == Some(room.path.as_str());
            if ui.selectable_label(selected, &room.name).clicked() && !selected {
                actions.open_room = Some(room.path.clone());
            }
        }
    }

    ui.separator();
    ui.label("Friends:");
    if !state.directory.has_friends() {
        ui.label(egui::RichText::new("Search users to find friends").weak());
    }
    for (friend_id, name) in state.directory.friends() {
        ui.horizontal(|ui| {
            ui.label(name);
            if ui.small_button("Chat").clicked() {
                actions.open_chat = Some((friend_id, name.to_string()));
            }
        });
    }

    ui.separator();
    ui.label("Find users:");
    // Gửi query mỗi lần nội dung ô tìm kiếm thay đổi
    if ui.text_edit_singleline(&mut state.search_input).changed() {
        actions.search_query = state.directory.begin_search(&state.search_input);
    }

    egui::ScrollArea::vertical()
        .id_salt("search_results")
        .show(ui, |ui| {
            for fragment in state.directory.fragments() {
                match fragment {
                    SearchFragment::Divider => {
                        ui.separator();
                    }
                    SearchFragment::Row {
                        user_id,
                        name,
                        control,
                    } => {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(name.as_str()).size(16.0));
                            let button = egui::Button::new(control.label());
                            if ui.add_enabled(!control.is_disabled(), button).clicked() {
                                actions.add_friend = Some((user_id, name));
                            }
                        });
                    }
                }
            }
        });

    actions
}
