//! Storage layer for KingPin tournament orders
//!
//! This crate holds the records of the ordering system (bowlers, tournaments
//! and the orders linking them) behind the async [`Store`] trait.
//!
//! # Features
//!
//! - Name-keyed point lookups with a distinct `NotFound` error on a miss
//! - Store-assigned order ids, starting at 1
//! - Atomic batch saves (all orders stored or none)
//! - YAML snapshots for loading and persisting the in-memory store
//!
//! # Example
//!
//! ```no_run
//! use kingpin_storage::{MemoryStore, NewOrder, Store, Tournament, User};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::new();
//!     store.create_user(User::new("McCracken", 100)).await?;
//!     store.create_item(Tournament::new("Bowlerama Lanes Iowa", 7)).await?;
//!
//!     let order = store
//!         .save_order(NewOrder::new("McCracken", "Bowlerama Lanes Iowa"))
//!         .await?;
//!     println!("stored order {}", order.id);
//!
//!     store.persist("kingpin-data.yaml").await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-export main types
pub use config::StorageConfig;
pub use error::{Result, StorageError};
pub use memory::MemoryStore;
pub use snapshot::StoreSnapshot;
pub use store::Store;
pub use types::{
    EntityKind, ItemName, NewOrder, Order, OrderId, Tournament, User, UserName, DEFAULT_CATEGORY,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
