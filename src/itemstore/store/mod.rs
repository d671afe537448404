//! # Storage Layer
//!
//! Items are persisted through the [`ItemRepository`] trait. The application only
//! ever appends: there is no read, update or delete path.
//!
//! ## Implementations
//!
//! - [`fs::FileItemStore`]: Production storage in a single JSON file
//!   - Whole collection re-read and rewritten on every insert
//!   - Two-space indented, human-readable output
//!   - Optional temp-file + rename writes
//!
//! - [`memory::InMemoryItemStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! ```text
//! {
//!   "items": [
//!     {
//!       "name": "apple"
//!     }
//!   ]
//! }
//! ```
//!
//! Item ids never reach the file. Keeping them unique is up to the caller.
//!
//! ## Concurrency
//!
//! Inserts are a plain read-modify-write with no locking. Two writers racing on
//! the same file can lose an update; callers must serialize access themselves.

use crate::error::Result;
use crate::model::Item;

pub mod fs;
pub mod memory;

/// Abstract interface for item persistence.
pub trait ItemRepository {
    /// Append an item to the end of the stored collection.
    fn insert(&mut self, item: &Item) -> Result<()>;
}
