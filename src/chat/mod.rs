pub mod composer;
pub mod render;
pub mod scroll;
pub mod timeline;

pub use composer::{compose_text, image_frame};
pub use render::{
    ChatFragment, FragmentBody, MediaBlock, Meridiem, RenderOptions, Side, format_time_label,
    render_message, time_label,
};
pub use scroll::ScrollLatch;
pub use timeline::Timeline;
