//! Binding action creators to a dispatcher.
//!
//! The view layer gets plain callables and never builds actions or
//! touches the dispatcher itself.

use crate::store::Dispatcher;
use crate::todos::{Action, ActionCreators, Item, ItemId};

/// A creator with dispatch applied. Takes the creator's argument.
pub type BoundFn<A> = Box<dyn Fn(A) + Send + Sync>;

/// Wrap `creator` so that calling the result dispatches what it builds.
///
/// Dispatching into a closed store is logged and otherwise ignored.
pub fn bind<A, F>(dispatcher: &Dispatcher, creator: F) -> impl Fn(A) + Send + Sync + 'static
where
    A: 'static,
    F: Fn(A) -> Action + Send + Sync + 'static,
{
    let dispatcher = dispatcher.clone();
    move |args| {
        let action = creator(args);
        let kind = action.kind();
        if dispatcher.dispatch(action).is_err() {
            tracing::warn!(action = kind, "Bound action dropped (store closed)");
        }
    }
}

/// The todo action creators, bound.
pub struct BoundActions {
    pub set_todos: BoundFn<Vec<Item>>,
    /// Synchronous or delayed add, depending on the creators' mode.
    pub add_todo: BoundFn<String>,
    pub add_item: BoundFn<Item>,
    pub toggle_todo: BoundFn<ItemId>,
    pub remove_todo: BoundFn<ItemId>,
}

impl ActionCreators {
    pub fn bind(&self, dispatcher: &Dispatcher) -> BoundActions {
        let creators = self.clone();
        let set_todos = bind(dispatcher, move |items: Vec<Item>| creators.set(items));
        let creators = self.clone();
        let add_todo = bind(dispatcher, move |text: String| creators.submit(text));
        let creators = self.clone();
        let add_item = bind(dispatcher, move |item: Item| creators.add(item));
        let creators = self.clone();
        let toggle_todo = bind(dispatcher, move |id: ItemId| creators.toggle(id));
        let creators = self.clone();
        let remove_todo = bind(dispatcher, move |id: ItemId| creators.remove(id));

        BoundActions {
            set_todos: Box::new(set_todos),
            add_todo: Box::new(add_todo),
            add_item: Box::new(add_item),
            toggle_todo: Box::new(toggle_todo),
            remove_todo: Box::new(remove_todo),
        }
    }
}
