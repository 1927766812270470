//! Todo list state, actions, reducer and action creators.

mod action;
mod creators;
mod reducer;
mod state;

pub use action::Action;
pub use creators::{ActionCreators, AddMode, IdSequence, ADD_DELAY};
pub use reducer::TodoReducer;
pub use state::{Item, ItemId, TodoState};
