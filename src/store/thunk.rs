use std::fmt;
use std::sync::Arc;

use super::dispatcher::{Dispatcher, StateReader};

type Procedure = dyn Fn(&Dispatcher, &StateReader) + Send + Sync;

/// A deferred action: a procedure over dispatch and state access.
///
/// Cloning shares the same procedure. Two thunks are equal only when
/// they share it.
#[derive(Clone)]
pub struct Thunk(Arc<Procedure>);

impl Thunk {
    pub fn new<F>(procedure: F) -> Self
    where
        F: Fn(&Dispatcher, &StateReader) + Send + Sync + 'static,
    {
        Self(Arc::new(procedure))
    }

    pub(crate) fn run(&self, dispatcher: &Dispatcher, state: &StateReader) {
        (self.0)(dispatcher, state)
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk(..)")
    }
}

impl PartialEq for Thunk {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
