use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::{mpsc, oneshot};
use tokio::task::AbortHandle;

use crate::todos::{Action, TodoState};

use super::error::StoreError;

/// Messages consumed by the engine, strictly in arrival order.
pub(crate) enum Envelope {
    Dispatch(Action),
    /// Answered once the queue has nothing left to process.
    Flush {
        respond_to: oneshot::Sender<()>,
    },
    Shutdown,
}

pub(crate) type InlineQueue = Arc<Mutex<VecDeque<Action>>>;

/// Entry point for every state transition.
///
/// Sending never blocks: actions are queued and processed by the engine
/// one at a time. A handle passed to a running thunk is special: what it
/// dispatches is processed right after the thunk returns, ahead of
/// anything already queued. Clones of that handle are ordinary queue
/// handles, so they stay valid after the thunk is done.
pub struct Dispatcher {
    sender: mpsc::UnboundedSender<Envelope>,
    inline: Option<InlineQueue>,
}

impl Clone for Dispatcher {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            inline: None,
        }
    }
}

impl Dispatcher {
    pub(crate) fn new(sender: mpsc::UnboundedSender<Envelope>) -> Self {
        Self {
            sender,
            inline: None,
        }
    }

    pub(crate) fn inline(sender: mpsc::UnboundedSender<Envelope>, queue: InlineQueue) -> Self {
        Self {
            sender,
            inline: Some(queue),
        }
    }

    /// Queue `action` for processing.
    ///
    /// # Errors
    /// Returns [`StoreError::Closed`] if the engine has stopped.
    pub fn dispatch(&self, action: Action) -> Result<(), StoreError> {
        if let Some(queue) = &self.inline {
            queue.lock().push_back(action);
            return Ok(());
        }
        self.sender
            .send(Envelope::Dispatch(action))
            .map_err(|_| StoreError::Closed)
    }

    /// Queue `action` once `delay` has elapsed.
    ///
    /// Delayed actions join the queue in the order their delays elapse.
    /// Must be called from within a tokio runtime.
    pub fn dispatch_after(&self, delay: Duration, action: Action) -> ScheduledAction {
        let sender = self.sender.clone();
        let kind = action.kind();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if sender.send(Envelope::Dispatch(action)).is_err() {
                tracing::trace!(action = kind, "Delayed action dropped (store closed)");
            }
        });
        ScheduledAction {
            handle: task.abort_handle(),
        }
    }

    /// Wait until everything dispatched so far, including follow-ups
    /// dispatched from thunks, has been processed.
    ///
    /// Delayed actions still sleeping are not waited for.
    ///
    /// # Errors
    /// Returns [`StoreError::Closed`] if the engine has stopped.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let (respond_to, receiver) = oneshot::channel();
        self.sender
            .send(Envelope::Flush { respond_to })
            .map_err(|_| StoreError::Closed)?;
        receiver.await.map_err(|_| StoreError::Closed)
    }

    pub(crate) fn shutdown(&self) -> Result<(), StoreError> {
        self.sender
            .send(Envelope::Shutdown)
            .map_err(|_| StoreError::Closed)
    }
}

/// Handle to an action waiting for its delay to elapse.
#[derive(Debug)]
pub struct ScheduledAction {
    handle: AbortHandle,
}

impl ScheduledAction {
    /// Prevent the action from being queued. No effect once it fired.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// True once the action was queued or cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Read access to the committed state.
///
/// Every call to [`StateReader::get`] returns the state committed at
/// that moment, never a snapshot captured earlier.
#[derive(Debug, Clone, Default)]
pub struct StateReader {
    cell: Arc<RwLock<Arc<TodoState>>>,
}

impl StateReader {
    pub fn get(&self) -> Arc<TodoState> {
        Arc::clone(&self.cell.read())
    }

    pub(crate) fn replace(&self, state: Arc<TodoState>) {
        *self.cell.write() = state;
    }
}
