use crate::todos::TodoState;

/// Observer notified after every committed state change.
///
/// Runs on the engine task, synchronously after the commit and before
/// the next action is processed, so the whole store waits on it.
/// Blocking work such as file I/O stalls the engine's runtime worker for
/// its duration; hand anything slow off to another task.
pub trait Subscriber: Send + Sync {
    fn on_commit(&self, state: &TodoState);
}
