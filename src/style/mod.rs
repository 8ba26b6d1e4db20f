//! Style document model.
//!
//! Types for the vector map style format the editor operates on, plus the
//! color normalizer and the load-time shape validator.

pub mod color;
pub mod document;
pub mod path;
pub mod validate;

pub use color::{hex_to_rgba, normalize_color, normalize_color_input, rgba_to_hex};
pub use document::{generate_layer_id, Layer, LayerType, PropertyMap, StyleDocument, STYLE_VERSION};
pub use path::PropertyPath;
pub use validate::{validate, ValidationError};
