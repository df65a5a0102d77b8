/// In-memory shopping cart
///
/// An ordered list of catalog items copied in at add time. Adding the same
/// restaurant twice produces two distinct entries, each removable on its
/// own, so every entry carries a synthetic id handed out by a monotonic
/// counter. The total is always recomputed from the entries, never cached.

use crate::catalog::CatalogItem;

/// One item placed in the cart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartEntry {
    /// Synthetic id distinguishing duplicate catalog items
    pub entry_id: u64,
    /// The catalog item as it was at add time
    pub item: CatalogItem,
}

/// The current order's contents
#[derive(Debug, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
    next_id: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry for `item`; returns the new entry's id
    pub fn add(&mut self, item: CatalogItem) -> u64 {
        let entry_id = self.next_id;
        self.next_id += 1;
        self.entries.push(CartEntry { entry_id, item });
        entry_id
    }

    /// Remove the entry with the given id; silently does nothing if it is
    /// not in the cart
    pub fn remove(&mut self, entry_id: u64) {
        self.entries.retain(|entry| entry.entry_id != entry_id);
    }

    /// Sum of prices across all entries, 0 when empty
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|entry| entry.item.price).sum()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry (fulfillment completion)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
