//! Owner of the current editor state.
//!
//! A [`StyleStore`] holds the single live [`EditorState`], runs actions
//! through the reducer one at a time and tells subscribers when the document
//! or the selection changed.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::engine::action::Action;
use crate::engine::reducer::{reduce, EditorState};
use crate::error::Result;
use crate::style::{Layer, StyleDocument};

/// Handle returned by [`StyleStore::subscribe`].
pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&EditorState)>;

/// Holds the current state and notifies listeners on change.
pub struct StyleStore {
    state: EditorState,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
}

impl Default for StyleStore {
    fn default() -> Self {
        Self::new(StyleDocument::new_empty())
    }
}

impl fmt::Debug for StyleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl StyleStore {
    pub fn new(document: StyleDocument) -> Self {
        Self {
            state: EditorState::new(document),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn document(&self) -> &Arc<StyleDocument> {
        &self.state.document
    }

    pub fn selected_layer(&self) -> Option<&Arc<Layer>> {
        self.state.selected_layer.as_ref()
    }

    /// Apply an action. Returns whether the document or selection changed;
    /// listeners only run when it did.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = reduce(&self.state, &action);

        let document_changed = !Arc::ptr_eq(&next.document, &self.state.document);
        let selection_changed = match (&next.selected_layer, &self.state.selected_layer) {
            (Some(a), Some(b)) => !Arc::ptr_eq(a, b),
            (None, None) => false,
            _ => true,
        };

        if !document_changed && !selection_changed {
            debug!(action = action.kind(), "action left state unchanged");
            return false;
        }

        debug!(action = action.kind(), document_changed, selection_changed, "state updated");
        self.state = next;
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
        true
    }

    /// Validate a raw JSON document and load it.
    ///
    /// On failure the current document is kept and the error lists every
    /// problem found.
    pub fn load_validated(&mut self, raw: Value) -> Result<()> {
        let document = StyleDocument::from_validated_json(raw)?;
        self.dispatch(Action::load(document));
        Ok(())
    }

    /// Register a listener called after every state change.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&EditorState) + 'static,
    {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}
