use thiserror::Error;

/// Errors surfaced by the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The engine has stopped and no longer accepts actions.
    #[error("store is closed")]
    Closed,

    /// The engine task ended abnormally (for example a thunk panicked).
    #[error("store engine failed: {0}")]
    EngineFailed(#[from] tokio::task::JoinError),
}
