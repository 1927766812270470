use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot, watch};

use crate::mvi::Reducer;
use crate::todos::{Action, TodoReducer, TodoState};

use super::dispatcher::{Dispatcher, Envelope, InlineQueue, StateReader};
use super::subscriber::Subscriber;

/// Single consumer of the action queue. Owns every state commit.
pub(crate) struct Engine {
    receiver: mpsc::UnboundedReceiver<Envelope>,
    // Weak so the queue closes once every outside handle is gone.
    sender: mpsc::WeakUnboundedSender<Envelope>,
    state: StateReader,
    watch: watch::Sender<Arc<TodoState>>,
    subscribers: Vec<Arc<dyn Subscriber>>,
    idle_waiters: Vec<oneshot::Sender<()>>,
}

impl Engine {
    pub(crate) fn new(
        receiver: mpsc::UnboundedReceiver<Envelope>,
        sender: mpsc::WeakUnboundedSender<Envelope>,
        state: StateReader,
        watch: watch::Sender<Arc<TodoState>>,
        subscribers: Vec<Arc<dyn Subscriber>>,
    ) -> Self {
        Self {
            receiver,
            sender,
            state,
            watch,
            subscribers,
            idle_waiters: Vec::new(),
        }
    }

    pub(crate) async fn run(mut self) {
        'outer: while let Some(envelope) = self.receiver.recv().await {
            if !self.handle(envelope) {
                break;
            }
            // Drain what is already queued before telling flush waiters
            // the queue is idle.
            while let Ok(next) = self.receiver.try_recv() {
                if !self.handle(next) {
                    break 'outer;
                }
            }
            self.release_idle_waiters();
        }
        self.release_idle_waiters();
        tracing::debug!("Store engine stopped");
    }

    fn handle(&mut self, envelope: Envelope) -> bool {
        match envelope {
            Envelope::Dispatch(action) => {
                self.process(action);
                true
            }
            Envelope::Flush { respond_to } => {
                self.idle_waiters.push(respond_to);
                true
            }
            Envelope::Shutdown => false,
        }
    }

    /// Run one queued action to completion, including everything its
    /// thunks dispatch inline.
    fn process(&mut self, action: Action) {
        let inline: InlineQueue = Arc::new(Mutex::new(VecDeque::new()));
        let mut pending = VecDeque::from([action]);

        while let Some(action) = pending.pop_front() {
            match action {
                Action::Deferred(thunk) => {
                    let Some(sender) = self.sender.upgrade() else {
                        tracing::trace!("Deferred action skipped (no dispatchers left)");
                        continue;
                    };
                    let dispatcher = Dispatcher::inline(sender, Arc::clone(&inline));
                    thunk.run(&dispatcher, &self.state);

                    // Follow-ups run before the rest, like nested calls.
                    let mut follow_ups = std::mem::take(&mut *inline.lock());
                    follow_ups.append(&mut pending);
                    pending = follow_ups;
                }
                action => self.commit(action),
            }
        }
    }

    fn commit(&mut self, action: Action) {
        let kind = action.kind();
        let current = self.state.get();
        let next = TodoReducer::reduce(TodoState::clone(&current), action);

        if next == *current {
            tracing::trace!(action = kind, "Action left state unchanged");
            return;
        }

        let next = Arc::new(next);
        self.state.replace(Arc::clone(&next));
        tracing::debug!(
            action = kind,
            revision = next.revision_count,
            items = next.items.len(),
            "Action committed"
        );

        for subscriber in &self.subscribers {
            subscriber.on_commit(&next);
        }
        self.watch.send_replace(next);
    }

    fn release_idle_waiters(&mut self) {
        for waiter in self.idle_waiters.drain(..) {
            if waiter.send(()).is_err() {
                tracing::trace!("Flush response dropped (receiver gone)");
            }
        }
    }
}
