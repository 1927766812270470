//! Action creators and the item id sequence.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::state::{Item, ItemId};

/// How long an asynchronous add waits before checking for duplicates.
pub const ADD_DELAY: Duration = Duration::from_millis(3000);

/// Which add action [`ActionCreators::submit`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AddMode {
    /// Build the item up front and dispatch `Add` right away.
    #[default]
    Sync,
    /// Dispatch a deferred add that fires after [`ADD_DELAY`] unless an
    /// item with the same text exists by then.
    Async,
}

/// Shared, monotonically increasing source of item ids.
///
/// Cloning yields a handle to the same counter.
#[derive(Debug, Clone)]
pub struct IdSequence {
    last: Arc<AtomicI64>,
}

impl IdSequence {
    /// Seed from the current wall clock in milliseconds.
    pub fn from_clock() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        Self::starting_after(millis)
    }

    /// The first id handed out is `seed + 1`.
    pub fn starting_after(seed: ItemId) -> Self {
        Self {
            last: Arc::new(AtomicI64::new(seed)),
        }
    }

    pub fn next_id(&self) -> ItemId {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Make sure no future id collides with `id`.
    pub fn observe(&self, id: ItemId) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::from_clock()
    }
}

/// Builds actions for the view layer.
#[derive(Debug, Clone, Default)]
pub struct ActionCreators {
    ids: IdSequence,
    mode: AddMode,
}

impl ActionCreators {
    pub fn new(ids: IdSequence, mode: AddMode) -> Self {
        Self { ids, mode }
    }

    pub fn mode(&self) -> AddMode {
        self.mode
    }

    pub fn ids(&self) -> &IdSequence {
        &self.ids
    }

    pub fn set(&self, items: Vec<Item>) -> Action {
        Action::Set(items)
    }

    pub fn toggle(&self, id: ItemId) -> Action {
        Action::Toggle(id)
    }

    pub fn remove(&self, id: ItemId) -> Action {
        Action::Remove(id)
    }

    /// Item with the next id from the shared sequence.
    pub fn new_item(&self, text: impl Into<String>) -> Item {
        Item::new(self.ids.next_id(), text)
    }

    /// Synchronous add of a pre-built item.
    pub fn add(&self, item: Item) -> Action {
        Action::Add(item)
    }

    /// Asynchronous add.
    ///
    /// The returned action schedules a check after [`ADD_DELAY`]. The
    /// check runs against the state committed when the delay elapses:
    /// if no item has exactly this text, the next id is taken and `Add`
    /// is dispatched. Otherwise nothing happens.
    pub fn add_by_text(&self, text: impl Into<String>) -> Action {
        let text: Arc<str> = Arc::from(text.into());
        let ids = self.ids.clone();
        Action::deferred(move |dispatcher, _state| {
            let text = Arc::clone(&text);
            let ids = ids.clone();
            let check = Action::deferred(move |dispatcher, state| {
                if state.get().contains_text(&text) {
                    tracing::debug!(text = %text, "Duplicate add dropped");
                    return;
                }
                let item = Item::new(ids.next_id(), text.as_ref());
                if dispatcher.dispatch(Action::Add(item)).is_err() {
                    tracing::trace!("Delayed add dropped (store closed)");
                }
            });
            dispatcher.dispatch_after(ADD_DELAY, check);
        })
    }

    /// Add action for `text` in the configured [`AddMode`].
    pub fn submit(&self, text: impl Into<String>) -> Action {
        match self.mode {
            AddMode::Sync => self.add(self.new_item(text)),
            AddMode::Async => self.add_by_text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_pre_increments() {
        let ids = IdSequence::starting_after(100);
        assert_eq!(ids.next_id(), 101);
        assert_eq!(ids.next_id(), 102);
    }

    #[test]
    fn clones_share_the_counter() {
        let ids = IdSequence::starting_after(0);
        let other = ids.clone();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(other.next_id(), 2);
    }

    #[test]
    fn observe_skips_past_known_ids() {
        let ids = IdSequence::starting_after(10);
        ids.observe(50);
        assert_eq!(ids.next_id(), 51);
        ids.observe(3);
        assert_eq!(ids.next_id(), 52);
    }

    #[test]
    fn clock_seed_is_recent() {
        // 2020-01-01T00:00:00Z in milliseconds.
        assert!(IdSequence::from_clock().next_id() > 1_577_836_800_000);
    }

    #[test]
    fn plain_creators_wrap_payload() {
        let creators = ActionCreators::new(IdSequence::starting_after(0), AddMode::Sync);
        assert_eq!(creators.toggle(4), Action::Toggle(4));
        assert_eq!(creators.remove(4), Action::Remove(4));
        assert_eq!(creators.set(vec![]), Action::Set(vec![]));
    }

    #[test]
    fn submit_follows_mode() {
        let sync = ActionCreators::new(IdSequence::starting_after(0), AddMode::Sync);
        assert_eq!(sync.submit("milk"), Action::Add(Item::new(1, "milk")));

        let deferred = ActionCreators::new(IdSequence::starting_after(0), AddMode::Async);
        assert!(matches!(deferred.submit("milk"), Action::Deferred(_)));
        // No id is consumed until the delayed check actually adds.
        assert_eq!(deferred.ids().next_id(), 1);
    }

    #[test]
    fn add_mode_parses_from_lowercase() {
        let mode: AddMode = serde_json::from_str("\"async\"").unwrap();
        assert_eq!(mode, AddMode::Async);
    }
}
