/// In-flight download bookkeeping
///
/// Each pin has at most one running download. Removing a pin cancels its
/// download; a completion that arrives afterwards finds no entry.

use std::collections::HashMap;

use super::data::ImageId;

/// Something that can stop a running background task
pub trait Abort {
    fn abort(&self);
}

impl Abort for iced::task::Handle {
    fn abort(&self) {
        iced::task::Handle::abort(self);
    }
}

/// Running downloads keyed by pin
pub struct Downloads<H: Abort> {
    active: HashMap<ImageId, H>,
}

impl<H: Abort> Downloads<H> {
    pub fn new() -> Self {
        Self {
            active: HashMap::new(),
        }
    }

    pub fn is_active(&self, id: ImageId) -> bool {
        self.active.contains_key(&id)
    }

    /// Track a new download; refused while one is already running for `id`
    pub fn start(&mut self, id: ImageId, handle: H) -> bool {
        if self.is_active(id) {
            return false;
        }
        self.active.insert(id, handle);
        true
    }

    /// Forget a completed download. Returns false if it was already cancelled.
    pub fn finish(&mut self, id: ImageId) -> bool {
        self.active.remove(&id).is_some()
    }

    /// Abort the download of `id`, if any
    pub fn cancel_for(&mut self, id: ImageId) -> bool {
        match self.active.remove(&id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl<H: Abort> Default for Downloads<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Abort> std::fmt::Debug for Downloads<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Downloads")
            .field("active", &self.active.keys().collect::<Vec<_>>())
            .finish()
    }
}
