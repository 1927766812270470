//! Dispatch engine.
//!
//! A [`Store`] owns a single engine task that consumes a queue of
//! [`Action`]s. Plain actions go through the reducer and are committed
//! wholesale; deferred actions are run with a [`Dispatcher`] and a
//! [`StateReader`] so they can read live state and dispatch more work,
//! immediately or after a delay.
//!
//! ```text
//! Dispatcher ──→ queue ──→ Engine ──→ TodoReducer ──→ commit ──→ Subscribers
//!      ↑                     │                                    watch channel
//!      └──── thunks ─────────┘
//! ```

mod dispatcher;
mod engine;
mod error;
mod subscriber;
mod thunk;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::binder::BoundActions;
use crate::persist::{load_items, KeyValueSlot, PersistenceBridge};
use crate::todos::{Action, ActionCreators, AddMode, IdSequence, TodoState};

pub use dispatcher::{Dispatcher, ScheduledAction, StateReader};
pub use error::StoreError;
pub use subscriber::Subscriber;
pub use thunk::Thunk;

use engine::Engine;

/// Running store: dispatch in, committed state out.
pub struct Store {
    dispatcher: Dispatcher,
    state: StateReader,
    updates: watch::Receiver<Arc<TodoState>>,
    creators: ActionCreators,
    engine: JoinHandle<()>,
}

impl Store {
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Currently committed state.
    pub fn state(&self) -> Arc<TodoState> {
        self.state.get()
    }

    pub fn state_reader(&self) -> StateReader {
        self.state.clone()
    }

    /// Receiver that is marked changed after every commit.
    pub fn subscribe(&self) -> watch::Receiver<Arc<TodoState>> {
        self.updates.clone()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// # Errors
    /// Returns [`StoreError::Closed`] if the engine has stopped.
    pub fn dispatch(&self, action: Action) -> Result<(), StoreError> {
        self.dispatcher.dispatch(action)
    }

    pub fn creators(&self) -> &ActionCreators {
        &self.creators
    }

    /// Action creators with dispatch already applied.
    pub fn bind(&self) -> BoundActions {
        self.creators.bind(&self.dispatcher)
    }

    /// See [`Dispatcher::flush`].
    ///
    /// # Errors
    /// Returns [`StoreError::Closed`] if the engine has stopped.
    pub async fn flush(&self) -> Result<(), StoreError> {
        self.dispatcher.flush().await
    }

    /// Process everything already queued, then stop the engine.
    ///
    /// Delayed actions that have not fired yet are dropped.
    ///
    /// # Errors
    /// Returns [`StoreError::EngineFailed`] if the engine task panicked.
    pub async fn shutdown(self) -> Result<(), StoreError> {
        // A closed queue just means the engine is already gone.
        if self.dispatcher.flush().await.is_ok() {
            let _ = self.dispatcher.shutdown();
        }
        drop(self.dispatcher);
        self.engine.await?;
        Ok(())
    }
}

/// Configures and starts a [`Store`].
#[derive(Default)]
pub struct StoreBuilder {
    mode: AddMode,
    ids: Option<IdSequence>,
    slot: Option<Arc<dyn KeyValueSlot>>,
    subscribers: Vec<Arc<dyn Subscriber>>,
}

impl StoreBuilder {
    pub fn add_mode(mut self, mode: AddMode) -> Self {
        self.mode = mode;
        self
    }

    /// Defaults to a sequence seeded from the clock.
    pub fn id_sequence(mut self, ids: IdSequence) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Load from and persist to this slot.
    pub fn storage(mut self, slot: Arc<dyn KeyValueSlot>) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn subscriber(mut self, subscriber: Arc<dyn Subscriber>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Spawn the engine on the current tokio runtime.
    ///
    /// With storage configured, the persisted items are loaded and
    /// dispatched as a single `Set` before anything else.
    ///
    /// # Errors
    /// Returns [`StoreError::Closed`] if the engine could not accept the
    /// initial load.
    pub fn start(self) -> Result<Store, StoreError> {
        let ids = self.ids.unwrap_or_default();
        let mut subscribers = self.subscribers;

        let loaded = self.slot.map(|slot| {
            let items = load_items(slot.as_ref());
            if let Some(max_id) = items.iter().map(|item| item.id).max() {
                ids.observe(max_id);
            }
            subscribers.push(Arc::new(PersistenceBridge::new(slot)));
            items
        });

        let (sender, receiver) = mpsc::unbounded_channel();
        let state = StateReader::default();
        let (watch_tx, updates) = watch::channel(state.get());
        let engine = Engine::new(
            receiver,
            sender.downgrade(),
            state.clone(),
            watch_tx,
            subscribers,
        );
        let engine = tokio::spawn(engine.run());

        let dispatcher = Dispatcher::new(sender);
        if let Some(items) = loaded {
            tracing::debug!(items = items.len(), "Loaded persisted items");
            dispatcher.dispatch(Action::Set(items))?;
        }

        Ok(Store {
            dispatcher,
            state,
            updates,
            creators: ActionCreators::new(ids, self.mode),
            engine,
        })
    }
}
