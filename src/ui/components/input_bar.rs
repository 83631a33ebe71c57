use eframe::egui;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputActions {
    pub send_text: bool,
    pub pick_image: bool,
}

/// Enter gửi tin, Shift+Enter xuống dòng.
pub fn render(ui: &mut egui::Ui, input_text: &mut String) -> InputActions {
    let mut actions = InputActions::default();
    let input_id = egui::Id::new("chat_input");

    // Consume Enter before the text edit sees it, otherwise it becomes a newline.
    let focused = ui.memory(|memory| memory.has_focus(input_id));
    if focused
        && ui.input_mut(|input| {
            !input.modifiers.shift && input.consume_key(egui::Modifiers::NONE, egui::Key::Enter)
        })
    {
        actions.send_text = true;
    }

    ui.horizontal(|ui| {
        if ui.button("🖼").on_hover_text("Send image").clicked() {
            actions.pick_image = true;
        }
        ui.add(
            egui::TextEdit::multiline(input_text)
                .id(input_id)
                .desired_rows(2)
                .desired_width(ui.available_width() - 64.0)
                .hint_text("Message"),
        );
        if ui.button("Send").clicked() {
            actions.send_text = true;
        }
    });

    actions
}
