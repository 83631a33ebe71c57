/// Scroll latch cho khung chat.
///
/// Holds the last content height seen after an append. Only a changed height
/// produces a scroll target, so repeated paints without new content leave the
/// view where the user put it.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScrollLatch {
    last_height: Option<f32>,
}

impl ScrollLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the offset that shows the bottom of the content when the height
    /// changed since the last call, `None` otherwise.
    pub fn observe(&mut self, content_height: f32, viewport_height: f32) -> Option<f32> {
        if self.last_height == Some(content_height) {
            return None;
        }
        self.last_height = Some(content_height);
        Some((content_height - viewport_height).max(0.0))
    }

    pub fn last_height(&self) -> Option<f32> {
        self.last_height
    }
}
