use std::sync::Arc;

use crate::store::Subscriber;
use crate::todos::{Item, TodoState};

use super::slot::{KeyValueSlot, StorageError};

/// Slot key holding the serialized item list.
pub const TODOS_KEY: &str = "__TODOS__";

/// Read the persisted item list.
///
/// Absent, unreadable or malformed data yields an empty list.
pub fn load_items(slot: &dyn KeyValueSlot) -> Vec<Item> {
    let raw = match slot.read(TODOS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to read persisted items, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(error = %err, "Persisted items are malformed, starting empty");
            Vec::new()
        }
    }
}

/// Serialize `items` as a JSON array into the slot.
///
/// # Errors
/// Returns an error if encoding or the slot write fails.
pub fn save_items(slot: &dyn KeyValueSlot, items: &[Item]) -> Result<(), StorageError> {
    let encoded = serde_json::to_string(items)?;
    slot.write(TODOS_KEY, &encoded)
}

/// Writes the item list after every committed change.
///
/// Only `items` is persisted; the revision counter is not. The write
/// happens on the engine task, so a commit is on disk by the time a
/// later [`flush`](crate::store::Store::flush) returns.
pub struct PersistenceBridge {
    slot: Arc<dyn KeyValueSlot>,
}

impl PersistenceBridge {
    pub fn new(slot: Arc<dyn KeyValueSlot>) -> Self {
        Self { slot }
    }
}

impl Subscriber for PersistenceBridge {
    fn on_commit(&self, state: &TodoState) {
        if let Err(err) = save_items(self.slot.as_ref(), &state.items) {
            tracing::warn!(error = %err, "Failed to persist items");
        }
    }
}
