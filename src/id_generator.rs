use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

// Single static counter for all items
static NEXT_ITEM_ID: AtomicUsize = AtomicUsize::new(1);

/// Identity of an item owned by the [`crate::Document`].
///
/// Handles, crop overlays and commands refer to items through this id and
/// never own the item itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(usize);

impl ItemId {
    pub fn raw(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub fn generate_id() -> ItemId {
    ItemId(NEXT_ITEM_ID.fetch_add(1, Ordering::SeqCst))
}
