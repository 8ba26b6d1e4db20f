//! Mapstyle - Map Style Editing Engine
//!
//! Mapstyle edits vector map style documents (the JSON format describing map
//! sources and drawable layers).
//!
//! # Architecture
//!
//! - [`style`]: document model, color normalization and load-time validation
//! - [`engine`]: pure state transitions over documents, and a store that owns
//!   the live document for a host
//! - [`classify`]: search-aware grouping of layers for layer lists
//! - [`state`]: JSON file storage around the engine
//! - [`cli`]: the `mapstyle-cli` command surface
//!
//! Edits never mutate a document in place. Each action returns a new
//! `Arc<StyleDocument>` that shares untouched layers with the old one, and
//! returns the input `Arc` itself when nothing changed.

pub mod classify;
pub mod cli;
pub mod engine;
pub mod error;
pub mod state;
pub mod style;

pub use classify::{classify, classify_with, LayerCategory, LayerGroup, LayerNameTranslator};
pub use engine::{apply_action, reduce, Action, EditorState, StyleStore};
pub use error::{Result, StyleError};
pub use style::{normalize_color, validate, Layer, LayerType, PropertyPath, StyleDocument, ValidationError};
