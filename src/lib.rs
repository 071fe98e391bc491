//! Stateful Layout - a GTK4 container showing one named state view at a time.
//!
//! A `StatefulLayout` owns a registry of named state views (content, loading,
//! error, empty, or any caller-defined state), keeps exactly one of them
//! visible, persists the active state across a destroy-and-recreate cycle,
//! and notifies an optional observer on every state change. Built with
//! Libadwaita in a plain synchronous main-context model.

pub mod error;
pub mod layout;
pub mod persistence;

// Re-export key types for convenience
pub use {
    error::StateError,
    layout::{SAVED_STATE_KEY, StatefulLayout, state_id::StateId},
    persistence::{INSTANCE_STATE_KEY, InstanceState, PersistenceError},
};
