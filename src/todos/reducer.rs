//! Reducer for the todo list.

use crate::mvi::Reducer;

use super::action::Action;
use super::state::TodoState;

/// Synchronous state transitions of the todo list.
pub struct TodoReducer;

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            Action::Set(items) => TodoState {
                items,
                revision_count: state.revision_count + 1,
            },

            Action::Add(item) => {
                let TodoState {
                    mut items,
                    revision_count,
                } = state;
                items.push(item);
                TodoState {
                    items,
                    revision_count: revision_count + 1,
                }
            }

            Action::Toggle(id) => {
                let TodoState {
                    mut items,
                    revision_count,
                } = state;
                for item in items.iter_mut().filter(|item| item.id == id) {
                    item.complete = !item.complete;
                }
                TodoState {
                    items,
                    revision_count,
                }
            }

            Action::Remove(id) => {
                let TodoState {
                    mut items,
                    revision_count,
                } = state;
                items.retain(|item| item.id != id);
                TodoState {
                    items,
                    revision_count,
                }
            }

            // Not state transitions: the engine runs deferred actions itself.
            Action::Deferred(_) | Action::Unknown => state,
        }
    }
}
