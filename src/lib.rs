//! Todo list state engine.
//!
//! Unidirectional state management with a pure reducer, a queued
//! dispatch engine that also runs deferred actions (thunks), bound
//! action creators for the view layer and a persistence bridge to a
//! flat key-value slot.

pub mod binder;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod persist;
pub mod store;
pub mod todos;
pub mod view;
