//! Persistence bridge: load the item list on start, save it after every
//! committed change.

mod bridge;
mod slot;

pub use bridge::{load_items, save_items, PersistenceBridge, TODOS_KEY};
pub use slot::{FileSlot, KeyValueSlot, MemorySlot, StorageError};
