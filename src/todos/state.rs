use serde::{Deserialize, Serialize};

use crate::mvi::StoreState;

/// Identifier of a single todo item.
pub type ItemId = i64;

/// One entry of the todo list.
///
/// Field names are part of the persisted layout, do not rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    pub complete: bool,
}

impl Item {
    /// New, not yet completed item.
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            complete: false,
        }
    }
}

/// Complete state held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TodoState {
    /// Items in display order. Ids are unique.
    pub items: Vec<Item>,
    /// Incremented by every `Set` and `Add`. Observable counter only.
    pub revision_count: u64,
}

impl StoreState for TodoState {}

impl TodoState {
    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Exact, case-sensitive text match against every item.
    pub fn contains_text(&self, text: &str) -> bool {
        self.items.iter().any(|item| item.text == text)
    }
}

