//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::TempDir;
use todoflow::persist::{KeyValueSlot, MemorySlot};
use todoflow::store::{Store, Subscriber};
use todoflow::todos::{AddMode, IdSequence, Item, TodoState};

/// Store without storage whose ids start at 1.
pub fn memory_store(mode: AddMode) -> Store {
    Store::builder()
        .add_mode(mode)
        .id_sequence(IdSequence::starting_after(0))
        .start()
        .expect("store start")
}

/// Store persisting into `slot` whose ids start at 1.
pub fn persisted_store(slot: &MemorySlot, mode: AddMode) -> Store {
    Store::builder()
        .add_mode(mode)
        .id_sequence(IdSequence::starting_after(0))
        .storage(Arc::new(slot.clone()))
        .start()
        .expect("store start")
}

/// Temporary directory with a storage file path inside it.
pub fn temp_storage() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("storage.json");
    (temp_dir, path)
}

pub fn texts(state: &TodoState) -> Vec<&str> {
    state.items.iter().map(|item| item.text.as_str()).collect()
}

pub fn ids(state: &TodoState) -> Vec<i64> {
    state.items.iter().map(|item| item.id).collect()
}

/// Records every committed state it sees.
#[derive(Default)]
pub struct RecordingSubscriber {
    commits: AtomicUsize,
    seen: Mutex<Vec<TodoState>>,
}

impl RecordingSubscriber {
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<TodoState> {
        self.seen.lock().clone()
    }
}

impl Subscriber for RecordingSubscriber {
    fn on_commit(&self, state: &TodoState) {
        self.commits.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(state.clone());
    }
}
