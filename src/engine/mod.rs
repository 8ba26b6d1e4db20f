//! Mutation engine
//!
//! Pure, synchronous edits over style documents, plus the store that owns
//! the live document for a host application.

pub mod action;
pub mod reducer;
pub mod store;

pub use action::Action;
pub use reducer::{apply_action, reduce, EditorState};
pub use store::{ListenerId, StyleStore};
