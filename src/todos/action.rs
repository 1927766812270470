use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::store::{Dispatcher, StateReader, Thunk};

use super::state::{Item, ItemId};

/// Everything that can be sent through a [`Dispatcher`].
///
/// Plain variants have a wire form `{"type": "...", "payload": ...}`.
/// Any unrecognized `type` decodes to [`Action::Unknown`] whatever its
/// payload, and the reducer ignores it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Action {
    /// Replace the whole item list.
    Set(Vec<Item>),
    /// Append a fully-formed item.
    Add(Item),
    /// Flip completion of every item with this id.
    Toggle(ItemId),
    /// Drop every item with this id.
    Remove(ItemId),
    /// Procedure run by the engine with dispatch and state access.
    #[serde(skip)]
    Deferred(Thunk),
    /// Any tag this build does not recognize.
    Unknown,
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Descriptor {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            payload: serde_json::Value,
        }

        let Descriptor { kind, payload } = Descriptor::deserialize(deserializer)?;
        let action = match kind.as_str() {
            "set" => serde_json::from_value(payload).map(Self::Set),
            "add" => serde_json::from_value(payload).map(Self::Add),
            "toggle" => serde_json::from_value(payload).map(Self::Toggle),
            "remove" => serde_json::from_value(payload).map(Self::Remove),
            _ => return Ok(Self::Unknown),
        };
        action.map_err(de::Error::custom)
    }
}

impl Action {
    /// Wrap a closure as a deferred action.
    pub fn deferred<F>(procedure: F) -> Self
    where
        F: Fn(&Dispatcher, &StateReader) + Send + Sync + 'static,
    {
        Self::Deferred(Thunk::new(procedure))
    }

    /// Short tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Set(_) => "set",
            Self::Add(_) => "add",
            Self::Toggle(_) => "toggle",
            Self::Remove(_) => "remove",
            Self::Deferred(_) => "deferred",
            Self::Unknown => "unknown",
        }
    }
}
