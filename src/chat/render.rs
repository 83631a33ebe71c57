//! Message -> fragment conversion.
//!
//! Rendering is split in two: [`render_message`] builds a plain [`ChatFragment`]
//! record here, and `ui::components::chat_area` paints it with egui. Nothing in
//! this module touches the UI, so the timeline can be checked without a window.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::common::{ChatContent, ChatMessage, MediaRef, UserId};

/// Media is drawn at this fraction of the current viewport width.
pub const MEDIA_WIDTH_FRACTION: f32 = 0.6;

const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Locale-specific AM/PM markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meridiem {
    pub am: String,
    pub pm: String,
}

impl Default for Meridiem {
    fn default() -> Self {
        Self {
            am: "오전".to_string(),
            pm: "오후".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Absolute base URL that media names are appended to.
    pub media_base: String,
    pub meridiem: Meridiem,
}

/// Tin nhắn của mình hay của người khác.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Mine,
    Other,
}

impl Side {
    pub fn of(writer_id: UserId, login_user: UserId) -> Self {
        if writer_id == login_user {
            Side::Mine
        } else {
            Side::Other
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Side::Mine => "mine",
            Side::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaBlock {
    pub src: String,
    /// Full-size link, opened on click.
    pub link: String,
    pub width_fraction: f32,
    pub autoplay: bool,
    pub muted: bool,
}

impl MediaBlock {
    fn image(src: String) -> Self {
        Self {
            link: src.clone(),
            src,
            width_fraction: MEDIA_WIDTH_FRACTION,
            autoplay: false,
            muted: false,
        }
    }

    fn video(src: String) -> Self {
        Self {
            autoplay: true,
            muted: true,
            ..Self::image(src)
        }
    }

    pub fn width_for(&self, viewport_width: f32) -> f32 {
        viewport_width * self.width_fraction
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FragmentBody {
    /// One entry per source line; each boundary is a line break.
    Text { lines: Vec<String> },
    Image(MediaBlock),
    Video(MediaBlock),
}

/// One rendered node of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatFragment {
    pub side: Side,
    pub writer: String,
    pub body: FragmentBody,
    pub time_label: String,
}

pub fn render_message(
    message: &ChatMessage,
    login_user: UserId,
    options: &RenderOptions,
) -> ChatFragment {
    let body = match &message.content {
        ChatContent::Text { text } => FragmentBody::Text {
            lines: text.split('\n').map(str::to_string).collect(),
        },
        ChatContent::Image { image } => {
            FragmentBody::Image(MediaBlock::image(media_url(&options.media_base, image)))
        }
        ChatContent::Video { image } => {
            FragmentBody::Video(MediaBlock::video(media_url(&options.media_base, image)))
        }
    };

    ChatFragment {
        side: Side::of(message.writer_id, login_user),
        writer: message.writer.name.clone(),
        body,
        time_label: time_label(&message.time, &options.meridiem),
    }
}

fn media_url(base: &str, media: &MediaRef) -> String {
    format!("{}/{}", base.trim_end_matches('/'), media.image_name)
}

/// `"{marker} {h}:{mm}"`, 12-hour clock with hour 0 shown as 12.
pub fn format_time_label(hour: u32, minute: u32, meridiem: &Meridiem) -> String {
    let marker = if hour % 24 >= 12 {
        &meridiem.pm
    } else {
        &meridiem.am
    };
    let hour = (hour % 12 + 11) % 12 + 1;
    format!("{marker} {hour}:{minute:02}")
}

/// Formats the wire `time` field. Server cũ gửi sẵn chuỗi đã format, nên chuỗi
/// không parse được sẽ được hiển thị nguyên văn.
pub fn time_label(raw: &str, meridiem: &Meridiem) -> String {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return format_time_label(stamp.hour(), stamp.minute(), meridiem);
    }
    for format in TIME_FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, format) {
            return format_time_label(stamp.hour(), stamp.minute(), meridiem);
        }
    }
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M:%S%.f") {
        return format_time_label(time.hour(), time.minute(), meridiem);
    }
    if let Some((hour, minute)) = parse_marked_time(raw, meridiem) {
        return format_time_label(hour, minute, meridiem);
    }
    raw.to_string()
}

/// Server-side labels such as `"오후 03:05"`: a marker, then a 12-hour `HH:MM`.
/// Returns the 24-hour time.
fn parse_marked_time(raw: &str, meridiem: &Meridiem) -> Option<(u32, u32)> {
    let (rest, pm) = if let Some(rest) = raw.strip_prefix(meridiem.pm.as_str()) {
        (rest, true)
    } else {
        (raw.strip_prefix(meridiem.am.as_str())?, false)
    };
    let (hour, minute) = rest.trim_start().split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    Some((hour % 12 + if pm { 12 } else { 0 }, minute))
}
