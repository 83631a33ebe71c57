use super::render::ChatFragment;

/// Append-only list of rendered messages, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct Timeline {
    fragments: Vec<ChatFragment>,
}

impl Timeline {
    pub fn append(&mut self, fragment: ChatFragment) {
        self.fragments.push(fragment);
    }

    pub fn fragments(&self) -> &[ChatFragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
