use eframe::egui;

use crate::chat::{ChatFragment, FragmentBody, MediaBlock, Side};
use crate::ui::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let viewport_width = ui.available_width();

    let mut area = egui::ScrollArea::vertical().auto_shrink([false, false]);
    if let Some(offset) = state.pending_scroll.take() {
        area = area.vertical_scroll_offset(offset);
    }

    let output = area.show(ui, |ui| {
        for fragment in state.timeline.fragments() {
            paint_fragment(ui, fragment, viewport_width);
            ui.add_space(6.0);
        }
    });

    if state
        .observe_scroll(output.content_size.y, output.inner_rect.height())
        .is_some()
    {
        ui.ctx().request_repaint();
    }
}

fn paint_fragment(ui: &mut egui::Ui, fragment: &ChatFragment, viewport_width: f32) {
    // Tin của mình căn phải, của người khác căn trái
    let align = match fragment.side {
        Side::Mine => egui::Align::Max,
        Side::Other => egui::Align::Min,
    };

    ui.with_layout(egui::Layout::top_down(align), |ui| {
        ui.label(egui::RichText::new(&fragment.writer).strong());
        egui::Frame::group(ui.style()).show(ui, |ui| match &fragment.body {
            FragmentBody::Text { lines } => {
                ui.label(lines.join("\n"));
            }
            FragmentBody::Image(block) => paint_image(ui, block, viewport_width),
            FragmentBody::Video(block) => paint_video(ui, block, viewport_width),
        });
        ui.label(egui::RichText::new(&fragment.time_label).small().weak());
    });
}

fn paint_image(ui: &mut egui::Ui, block: &MediaBlock, viewport_width: f32) {
    let width = block.width_for(viewport_width);
    let response = ui.add(
        egui::Image::from_uri(block.src.as_str())
            .max_width(width)
            .sense(egui::Sense::click()),
    );
    if response.clicked() {
        ui.ctx().open_url(egui::OpenUrl::new_tab(&block.link));
    }
    ui.hyperlink_to("Open full size", &block.link);
}

/// egui has no video widget, so the clip is drawn as a muted placeholder at
/// the same width as an image, with a link that plays it in the system player.
/// `autoplay` cannot be honoured in-app.
fn paint_video(ui: &mut egui::Ui, block: &MediaBlock, viewport_width: f32) {
    let width = block.width_for(viewport_width);
    ui.allocate_ui(egui::vec2(width, 0.0), |ui| {
        let mut caption = String::from("Video");
        if block.autoplay && block.muted {
            caption.push_str(" (muted)");
        }
        ui.label(egui::RichText::new(caption).weak());
        ui.hyperlink_to("▶ Play", &block.link);
    });
}
