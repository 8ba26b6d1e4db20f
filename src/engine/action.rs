//! Edit actions understood by the reducer.
//!
//! Actions serialize in the host's dispatch shape:
//! `{"type": "TOGGLE_LAYER_VISIBILITY", "payload": {"layerId": "water", "isVisible": false}}`.

use std::sync::Arc;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::style::{Layer, PropertyPath, StyleDocument};

/// A single edit to apply to the editor state.
///
/// Deserializing accepts any `type`: unknown ones become
/// [`Action::Unsupported`] whatever their payload holds. Known types with a
/// malformed payload are still an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    remote = "Self",
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum Action {
    /// Replace the whole document and clear the selection. Not validated.
    LoadStyle(Arc<StyleDocument>),

    /// Point the selection at a layer, or clear it.
    SetSelectedLayer(Option<Arc<Layer>>),

    /// Set `layout.visibility` on the first layer with this id.
    #[serde(rename_all = "camelCase")]
    ToggleLayerVisibility { layer_id: String, is_visible: bool },

    /// Write one value on a layer. Without a path, `value` must be an object
    /// whose keys are merged onto the layer's top level.
    #[serde(rename_all = "camelCase")]
    UpdateLayerProperty {
        layer_id: String,
        #[serde(
            default,
            deserialize_with = "optional_path",
            skip_serializing_if = "Option::is_none"
        )]
        property: Option<PropertyPath>,
        #[serde(default)]
        value: Value,
    },

    /// Swap every occurrence of one color for another under a paint or
    /// layout key, in every layer.
    #[serde(rename_all = "camelCase")]
    ReplaceColorAcrossLayers {
        from_color: String,
        to_color: String,
        property: PropertyPath,
    },

    /// Append a layer on top of the stack.
    AddLayer(Arc<Layer>),

    /// Any action type this engine does not know. Always a no-op.
    #[serde(skip_deserializing)]
    Unsupported,
}

/// Wire names of every action the reducer understands.
const KNOWN_TYPES: [&str; 6] = [
    "LOAD_STYLE",
    "SET_SELECTED_LAYER",
    "TOGGLE_LAYER_VISIBILITY",
    "UPDATE_LAYER_PROPERTY",
    "REPLACE_COLOR_ACROSS_LAYERS",
    "ADD_LAYER",
];

impl Serialize for Action {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Action::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let kind = raw
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| <D::Error as de::Error>::missing_field("type"))?;

        if !KNOWN_TYPES.contains(&kind) {
            return Ok(Action::Unsupported);
        }
        Action::deserialize(raw).map_err(de::Error::custom)
    }
}

impl Action {
    pub fn load(document: StyleDocument) -> Self {
        Action::LoadStyle(Arc::new(document))
    }

    pub fn select(layer: Option<Arc<Layer>>) -> Self {
        Action::SetSelectedLayer(layer)
    }

    pub fn toggle_visibility(layer_id: impl Into<String>, is_visible: bool) -> Self {
        Action::ToggleLayerVisibility {
            layer_id: layer_id.into(),
            is_visible,
        }
    }

    pub fn update_property(layer_id: impl Into<String>, property: PropertyPath, value: Value) -> Self {
        Action::UpdateLayerProperty {
            layer_id: layer_id.into(),
            property: Some(property),
            value,
        }
    }

    /// Shallow-merge `fields` onto the layer's top level.
    pub fn merge_fields(layer_id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Action::UpdateLayerProperty {
            layer_id: layer_id.into(),
            property: None,
            value: Value::Object(fields),
        }
    }

    pub fn replace_color(
        from_color: impl Into<String>,
        to_color: impl Into<String>,
        property: PropertyPath,
    ) -> Self {
        Action::ReplaceColorAcrossLayers {
            from_color: from_color.into(),
            to_color: to_color.into(),
            property,
        }
    }

    pub fn add_layer(layer: Layer) -> Self {
        Action::AddLayer(Arc::new(layer))
    }

    /// Wire name of the action, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::LoadStyle(_) => "LOAD_STYLE",
            Action::SetSelectedLayer(_) => "SET_SELECTED_LAYER",
            Action::ToggleLayerVisibility { .. } => "TOGGLE_LAYER_VISIBILITY",
            Action::UpdateLayerProperty { .. } => "UPDATE_LAYER_PROPERTY",
            Action::ReplaceColorAcrossLayers { .. } => "REPLACE_COLOR_ACROSS_LAYERS",
            Action::AddLayer(_) => "ADD_LAYER",
            Action::Unsupported => "UNSUPPORTED",
        }
    }
}

/// An empty or missing `property` means "merge".
fn optional_path<'de, D>(deserializer: D) -> Result<Option<PropertyPath>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(path) => path.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_dispatch_shape() {
        let action: Action = serde_json::from_value(json!({
            "type": "TOGGLE_LAYER_VISIBILITY",
            "payload": { "layerId": "water", "isVisible": false }
        }))
        .unwrap();
        assert_eq!(action, Action::toggle_visibility("water", false));
    }

    #[test]
    fn test_update_property_paths() {
        let action: Action = serde_json::from_value(json!({
            "type": "UPDATE_LAYER_PROPERTY",
            "payload": { "layerId": "water", "property": "paint.fill-opacity", "value": 0.5 }
        }))
        .unwrap();
        assert_eq!(
            action,
            Action::update_property("water", PropertyPath::paint("fill-opacity"), json!(0.5))
        );

        let merge: Action = serde_json::from_value(json!({
            "type": "UPDATE_LAYER_PROPERTY",
            "payload": { "layerId": "water", "property": "", "value": { "minzoom": 3 } }
        }))
        .unwrap();
        assert!(matches!(merge, Action::UpdateLayerProperty { property: None, .. }));

        let bad = serde_json::from_value::<Action>(json!({
            "type": "UPDATE_LAYER_PROPERTY",
            "payload": { "layerId": "water", "property": "filter.x", "value": 1 }
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let action: Action = serde_json::from_value(json!({ "type": "REORDER_LAYERS" })).unwrap();
        assert_eq!(action, Action::Unsupported);
    }

    #[test]
    fn test_unknown_type_with_payload_is_unsupported() {
        let action: Action = serde_json::from_value(json!({
            "type": "MOVE_LAYER",
            "payload": { "from": 1, "to": 2 }
        }))
        .unwrap();
        assert_eq!(action, Action::Unsupported);
    }

    #[test]
    fn test_missing_type_is_an_error() {
        assert!(serde_json::from_value::<Action>(json!({ "payload": {} })).is_err());
    }

    #[test]
    fn test_kind_matches_wire_name() {
        let action = Action::toggle_visibility("water", true);
        let raw = serde_json::to_value(&action).unwrap();
        assert_eq!(raw["type"], action.kind());
        assert!(KNOWN_TYPES.contains(&action.kind()));
    }

    #[test]
    fn test_round_trip_replace_color() {
        let action = Action::replace_color("#f00", "#0f0", PropertyPath::paint("fill-color"));
        let raw = serde_json::to_value(&action).unwrap();
        assert_eq!(raw["type"], "REPLACE_COLOR_ACROSS_LAYERS");
        assert_eq!(raw["payload"]["property"], "paint.fill-color");
        assert_eq!(raw["payload"]["fromColor"], "#f00");
        let back: Action = serde_json::from_value(raw).unwrap();
        assert_eq!(back, action);
    }
}
