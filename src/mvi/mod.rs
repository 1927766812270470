//! Unidirectional data flow primitives.
//!
//! ```text
//! Action ──→ Dispatcher ──→ Reducer ──→ State ──→ View
//!    ↑                                              │
//!    └──────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot, replaced wholesale on every commit
//! - **Reducer**: Pure function that transforms state based on actions
//!
//! Deferred work (thunks, delayed dispatch) lives in [`crate::store`],
//! never in a reducer.

mod reducer;
mod state;

pub use reducer::Reducer;
pub use state::StoreState;
