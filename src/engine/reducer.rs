//! The editor's state transition function.
//!
//! Every action produces a new state value; nothing is mutated in place.
//! Layers an action does not touch keep their `Arc`, and an action that
//! changes nothing returns the very same document `Arc`, so hosts can detect
//! changes with `Arc::ptr_eq`.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::engine::action::Action;
use crate::style::{normalize_color, Layer, PropertyPath, StyleDocument};

/// Everything the reducer tracks.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    /// The current style document.
    pub document: Arc<StyleDocument>,
    /// The layer picked in the layer list, as it was when selected.
    pub selected_layer: Option<Arc<Layer>>,
}

impl EditorState {
    pub fn new(document: StyleDocument) -> Self {
        Self {
            document: Arc::new(document),
            selected_layer: None,
        }
    }

    /// The current version of the selected layer, looked up by id.
    pub fn selected_in_document(&self) -> Option<&Arc<Layer>> {
        let selected = self.selected_layer.as_ref()?;
        self.document.layer_by_id(&selected.id)
    }
}

/// Apply one action to the editor state.
pub fn reduce(state: &EditorState, action: &Action) -> EditorState {
    match action {
        Action::LoadStyle(document) => EditorState {
            document: Arc::clone(document),
            selected_layer: None,
        },
        Action::SetSelectedLayer(layer) => EditorState {
            document: Arc::clone(&state.document),
            selected_layer: layer.clone(),
        },
        _ => EditorState {
            document: apply_action(&state.document, action),
            selected_layer: state.selected_layer.clone(),
        },
    }
}

/// Apply one action to a document.
///
/// Actions that only affect the selection leave the document untouched.
pub fn apply_action(document: &Arc<StyleDocument>, action: &Action) -> Arc<StyleDocument> {
    match action {
        Action::LoadStyle(next) => Arc::clone(next),
        Action::SetSelectedLayer(_) => Arc::clone(document),
        Action::ToggleLayerVisibility {
            layer_id,
            is_visible,
        } => toggle_visibility(document, layer_id, *is_visible),
        Action::UpdateLayerProperty {
            layer_id,
            property,
            value,
        } => update_property(document, layer_id, property.as_ref(), value),
        Action::ReplaceColorAcrossLayers {
            from_color,
            to_color,
            property,
        } => replace_color(document, from_color, to_color, property),
        Action::AddLayer(layer) => add_layer(document, layer),
        Action::Unsupported => {
            debug!("ignoring unsupported action");
            Arc::clone(document)
        }
    }
}

fn toggle_visibility(document: &Arc<StyleDocument>, layer_id: &str, is_visible: bool) -> Arc<StyleDocument> {
    let visibility = if is_visible { "visible" } else { "none" };
    update_first_layer(document, layer_id, |layer| {
        let mut updated = layer.clone();
        updated
            .layout
            .insert("visibility".to_string(), Value::String(visibility.to_string()));
        Some(updated)
    })
}

fn update_property(
    document: &Arc<StyleDocument>,
    layer_id: &str,
    property: Option<&PropertyPath>,
    value: &Value,
) -> Arc<StyleDocument> {
    update_first_layer(document, layer_id, |layer| match property {
        None => match value {
            Value::Object(fields) => retype(document, layer, fields),
            _ => {
                debug!(layer_id, "merge value is not an object, ignoring");
                None
            }
        },
        Some(PropertyPath::Field(name)) => {
            let mut fields = Map::new();
            fields.insert(name.clone(), value.clone());
            retype(document, layer, &fields)
        }
        Some(PropertyPath::Paint(key)) => {
            let mut updated = layer.clone();
            updated.paint.insert(key.clone(), value.clone());
            Some(updated)
        }
        Some(PropertyPath::Layout(key)) => {
            let mut updated = layer.clone();
            updated.layout.insert(key.clone(), value.clone());
            Some(updated)
        }
    })
}

/// Write top-level fields through serde. A rename must leave ids unique
/// and non-empty.
fn retype(document: &StyleDocument, layer: &Layer, fields: &Map<String, Value>) -> Option<Layer> {
    let Some(updated) = layer.with_fields(fields) else {
        warn!(layer_id = %layer.id, "value does not fit the layer field, ignoring");
        return None;
    };
    if updated.id != layer.id
        && (updated.id.is_empty() || document.layer_index(&updated.id).is_some())
    {
        warn!(layer_id = %layer.id, new_id = %updated.id, "layer id is empty or taken, ignoring");
        return None;
    }
    Some(updated)
}

fn add_layer(document: &Arc<StyleDocument>, layer: &Arc<Layer>) -> Arc<StyleDocument> {
    if layer.id.is_empty() || document.layer_index(&layer.id).is_some() {
        debug!(layer_id = %layer.id, "layer id is empty or taken, not adding");
        return Arc::clone(document);
    }
    let mut layers = document.layers.clone();
    layers.push(Arc::clone(layer));
    Arc::new(document.with_layers(layers))
}

/// Rebuild the document with the first layer matching `layer_id` replaced by
/// what `edit` returns. `None` from `edit`, an empty id or an unknown id all
/// hand back the input document.
fn update_first_layer<F>(document: &Arc<StyleDocument>, layer_id: &str, edit: F) -> Arc<StyleDocument>
where
    F: FnOnce(&Layer) -> Option<Layer>,
{
    if layer_id.is_empty() {
        return Arc::clone(document);
    }
    let Some(index) = document.layer_index(layer_id) else {
        debug!(layer_id, "no such layer, ignoring");
        return Arc::clone(document);
    };
    let Some(updated) = edit(&document.layers[index]) else {
        return Arc::clone(document);
    };

    let mut layers = document.layers.clone();
    layers[index] = Arc::new(updated);
    Arc::new(document.with_layers(layers))
}

fn replace_color(
    document: &Arc<StyleDocument>,
    from_color: &str,
    to_color: &str,
    property: &PropertyPath,
) -> Arc<StyleDocument> {
    if to_color.is_empty() || !property.is_property_key() {
        return Arc::clone(document);
    }
    let Some(target) = normalize_color(from_color) else {
        debug!(from_color, "source color does not parse, ignoring");
        return Arc::clone(document);
    };

    let mut changed = 0usize;
    let layers: Vec<Arc<Layer>> = document
        .layers
        .iter()
        .map(|layer| match replace_in_layer(layer, property, &target, to_color) {
            Some(updated) => {
                changed += 1;
                Arc::new(updated)
            }
            None => Arc::clone(layer),
        })
        .collect();

    if changed == 0 {
        return Arc::clone(document);
    }
    debug!(changed, %property, "replaced color");
    Arc::new(document.with_layers(layers))
}

/// Replace the color under `property` in one layer. The key is tried as
/// given, then with hyphens stripped for older documents.
fn replace_in_layer(layer: &Layer, property: &PropertyPath, target: &str, to_color: &str) -> Option<Layer> {
    let map = match property {
        PropertyPath::Paint(_) => &layer.paint,
        PropertyPath::Layout(_) => &layer.layout,
        PropertyPath::Field(_) => return None,
    };
    let key = property.key();
    let legacy_key = key.replace('-', "");
    let candidates = std::iter::once(key).chain((legacy_key != key).then_some(legacy_key.as_str()));

    for candidate in candidates {
        let Some(replaced) = map
            .get(candidate)
            .and_then(|value| replace_in_value(value, target, to_color))
        else {
            continue;
        };

        let mut updated = layer.clone();
        let target_map = match property {
            PropertyPath::Paint(_) => &mut updated.paint,
            _ => &mut updated.layout,
        };
        target_map.insert(candidate.to_string(), replaced);
        return Some(updated);
    }
    None
}

/// New value with matching color strings swapped, or `None` when nothing
/// matched. Arrays are searched element-wise; objects (stop functions) and
/// scalars are left alone.
fn replace_in_value(value: &Value, target: &str, to_color: &str) -> Option<Value> {
    match value {
        Value::String(s) => {
            let matches = normalize_color(s).as_deref() == Some(target);
            (matches && s != to_color).then(|| Value::String(to_color.to_string()))
        }
        Value::Array(items) => {
            let replaced: Vec<Option<Value>> = items
                .iter()
                .map(|item| replace_in_value(item, target, to_color))
                .collect();
            if replaced.iter().all(Option::is_none) {
                return None;
            }
            Some(Value::Array(
                items
                    .iter()
                    .zip(replaced)
                    .map(|(item, new)| new.unwrap_or_else(|| item.clone()))
                    .collect(),
            ))
        }
        _ => None,
    }
}
