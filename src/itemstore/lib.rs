//! # Itemstore
//!
//! A catalog of named items persisted to a single JSON file.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade used by whatever UI sits on top              │
//! │  - Checks inputs, stores images, inserts items              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, image.rs)                           │
//! │  - ItemRepository trait                                     │
//! │  - FileItemStore (production), InMemoryItemStore (testing)  │
//! │  - ImageStore trait with no-op and filesystem adapters      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Insert Cycle
//!
//! [`store::fs::FileItemStore`] keeps no state besides its path. Each insert:
//!
//! 1. Opens (or creates) the backing file without truncating it
//! 2. Decodes the `{ "items": [...] }` envelope; an empty file is an empty collection
//! 3. Appends the new item
//! 4. Truncates the file and writes the envelope back, two-space indented
//!
//! Malformed content aborts the insert before anything is written, so a corrupt
//! file is never clobbered. A failure after truncation can leave the file empty;
//! see [`store::fs::FileItemStore::with_atomic_writes`] for the rename-based mode.
//!
//! ## No I/O Assumptions
//!
//! The library never writes to stdout/stderr and never exits the process.
//! Diagnostics go through the `log` facade; installing a logger is up to the
//! binary that embeds it.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade for adding items
//! - [`store`]: Item repository trait and implementations
//! - [`image`]: Image storage collaborators
//! - [`model`]: `Item` and the `Items` envelope
//! - [`config`]: Store configuration
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod image;
pub mod model;
pub mod store;
