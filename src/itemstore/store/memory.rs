use super::ItemRepository;
use crate::error::{Result, StoreError};
use crate::model::{Item, Items};
use std::io;

/// In-memory item repository for testing.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: Items,
    simulate_write_error: bool,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection.
    pub fn with_items(items: Items) -> Self {
        Self {
            items,
            simulate_write_error: false,
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    pub fn items(&self) -> &Items {
        &self.items
    }
}

impl ItemRepository for InMemoryItemStore {
    fn insert(&mut self, item: &Item) -> Result<()> {
        if self.simulate_write_error {
            return Err(StoreError::Io(io::Error::other("Simulated write error")));
        }
        self.items.push(item.clone());
        Ok(())
    }
}
