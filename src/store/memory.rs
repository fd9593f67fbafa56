use std::collections::HashMap;
use std::sync::RwLock;

use crate::model::LayoutSnapshot;

/// Key under which the single shared layout lives.
pub const CURRENT_LAYOUT_KEY: &str = "current-layout";

/// Server-side keyed layout storage. The handlers own no state of their own;
/// whatever store is injected decides scope and durability.
pub trait LayoutStore: Send + Sync {
    fn fetch(&self, key: &str) -> Option<LayoutSnapshot>;
    fn put(&self, key: &str, snapshot: LayoutSnapshot);
}

/// Process-lifetime store: one slot per key, last write wins.
#[derive(Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, LayoutSnapshot>>,
}

impl LayoutStore for MemoryStore {
    fn fetch(&self, key: &str) -> Option<LayoutSnapshot> {
        self.slots.read().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, snapshot: LayoutSnapshot) {
        if let Ok(mut slots) = self.slots.write() {
            slots.insert(key.to_owned(), snapshot);
        }
    }
}
