//! Style document types.
//!
//! A [`StyleDocument`] is the subset of the vector map style format the editor
//! works with. Anything the editor does not model (`center`, `zoom`,
//! `metadata`, ...) is carried in the `extra` maps so a load/save round trip
//! is lossless.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::style::path::PropertyPath;

/// The only style format version the editor accepts.
pub const STYLE_VERSION: i64 = 8;

/// Source name used by [`Layer::template`] when the caller has none.
pub const DEFAULT_TEMPLATE_SOURCE: &str = "openmaptiles";

/// Insertion-ordered map of paint or layout properties.
pub type PropertyMap = Map<String, Value>;

/// Complete style document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    /// Style format version. Anything other than 8 fails validation, but is
    /// still representable so a host can load without validating.
    #[serde(default, deserialize_with = "whole_number")]
    pub version: i64,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Data sources, opaque to the editor.
    #[serde(default)]
    pub sources: Arc<Map<String, Value>>,
    /// Sprite URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    /// Glyphs URL template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,
    /// Drawable layers, bottom to top.
    #[serde(default)]
    pub layers: Vec<Arc<Layer>>,
    /// Top-level keys the editor does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StyleDocument {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl StyleDocument {
    /// A blank version 8 style with no sources or layers.
    pub fn new_empty() -> Self {
        Self {
            version: STYLE_VERSION,
            name: Some("New Style".to_string()),
            sources: Arc::new(Map::new()),
            sprite: None,
            glyphs: None,
            layers: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Parse a document from JSON text without validating it.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Copy of this document with a different layer list. Sources are shared.
    pub fn with_layers(&self, layers: Vec<Arc<Layer>>) -> Self {
        Self {
            version: self.version,
            name: self.name.clone(),
            sources: Arc::clone(&self.sources),
            sprite: self.sprite.clone(),
            glyphs: self.glyphs.clone(),
            layers,
            extra: self.extra.clone(),
        }
    }

    /// Find the first layer with the given id.
    pub fn layer_by_id(&self, id: &str) -> Option<&Arc<Layer>> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Position of the first layer with the given id.
    pub fn layer_index(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    /// Get all layers of a specific type.
    pub fn layers_by_type(&self, layer_type: &LayerType) -> Vec<&Arc<Layer>> {
        self.layers
            .iter()
            .filter(|l| &l.layer_type == layer_type)
            .collect()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

/// A single drawable layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer id, unique within a document. Empty when the source omitted it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "LayerType::is_unspecified")]
    pub layer_type: LayerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "source-layer", default, skip_serializing_if = "Option::is_none")]
    pub source_layer: Option<String>,
    /// No ordering against `maxzoom` is enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    /// Filter expression, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Map::is_empty")]
    pub paint: PropertyMap,
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Map::is_empty")]
    pub layout: PropertyMap,
    /// Layer keys the editor does not model (`metadata`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Layer {
    pub fn new(id: impl Into<String>, layer_type: LayerType) -> Self {
        Self {
            id: id.into(),
            layer_type,
            ..Default::default()
        }
    }

    /// Starter layer for a newly created style layer.
    pub fn template(layer_type: LayerType, id: impl Into<String>, source: Option<&str>) -> Self {
        let mut layer = Self::new(id, layer_type);
        layer.source = Some(source.unwrap_or(DEFAULT_TEMPLATE_SOURCE).to_string());
        layer.source_layer = Some("your-source-layer".to_string());

        let (paint, layout) = match &layer.layer_type {
            LayerType::Background => (
                json!({ "background-color": "#000000", "background-opacity": 1 }),
                json!({}),
            ),
            LayerType::Fill => (
                json!({ "fill-color": "#3388ff", "fill-opacity": 0.5 }),
                json!({}),
            ),
            LayerType::Line => (
                json!({ "line-color": "#3388ff", "line-width": 2 }),
                json!({}),
            ),
            LayerType::Symbol => (
                json!({ "text-color": "#ffffff" }),
                json!({ "text-field": "{name}", "text-size": 14 }),
            ),
            _ => (json!({}), json!({})),
        };
        if let Value::Object(paint) = paint {
            layer.paint = paint;
        }
        if let Value::Object(layout) = layout {
            layer.layout = layout;
        }
        layer
    }

    /// Layers without a `visibility` layout property are visible.
    pub fn is_visible(&self) -> bool {
        self.layout
            .get("visibility")
            .and_then(Value::as_str)
            .map(|v| v != "none")
            .unwrap_or(true)
    }

    /// Read a value by path. Top-level fields come back in their JSON form.
    pub fn property(&self, path: &PropertyPath) -> Option<Value> {
        match path {
            PropertyPath::Paint(key) => self.paint.get(key).cloned(),
            PropertyPath::Layout(key) => self.layout.get(key).cloned(),
            PropertyPath::Field(name) => self.field(name),
        }
    }

    fn field(&self, name: &str) -> Option<Value> {
        let non_empty = |map: &PropertyMap| (!map.is_empty()).then(|| Value::Object(map.clone()));
        match name {
            "id" => (!self.id.is_empty()).then(|| Value::String(self.id.clone())),
            "type" => (!self.layer_type.is_unspecified())
                .then(|| Value::String(self.layer_type.as_str().to_string())),
            "source" => self.source.clone().map(Value::String),
            "source-layer" => self.source_layer.clone().map(Value::String),
            "minzoom" => self.minzoom.map(Value::from),
            "maxzoom" => self.maxzoom.map(Value::from),
            "filter" => self.filter.clone(),
            "paint" => non_empty(&self.paint),
            "layout" => non_empty(&self.layout),
            other => self.extra.get(other).cloned(),
        }
    }

    /// Flat view for property panels: top-level fields first, then
    /// `paint.<key>` and `layout.<key>` entries in document order.
    pub fn flattened_properties(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for name in ["id", "type", "source", "source-layer", "minzoom", "maxzoom", "filter"] {
            if let Some(value) = self.field(name) {
                properties.insert(name.to_string(), value);
            }
        }
        for (key, value) in &self.paint {
            properties.insert(format!("paint.{}", key), value.clone());
        }
        for (key, value) in &self.layout {
            properties.insert(format!("layout.{}", key), value.clone());
        }
        properties
    }

    /// Copy of this layer with top-level `fields` written over it.
    ///
    /// Fields are re-typed through serde, so `None` comes back when a value
    /// does not fit the field it targets (a string `minzoom`, say).
    pub fn with_fields(&self, fields: &Map<String, Value>) -> Option<Layer> {
        let mut raw = match serde_json::to_value(self).ok()? {
            Value::Object(map) => map,
            _ => return None,
        };
        for (key, value) in fields {
            raw.insert(key.clone(), value.clone());
        }
        serde_json::from_value(Value::Object(raw)).ok()
    }
}

/// Integer field that also accepts whole floats such as `8.0`.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(de::Error::invalid_value(
            de::Unexpected::Other("non-integer number"),
            &"an integer",
        )),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<PropertyMap, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<PropertyMap>::deserialize(deserializer)?.unwrap_or_default())
}

/// Generate a fresh layer id of the form `layer_<millis>_<suffix>`.
pub fn generate_layer_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("layer_{}_{}", Utc::now().timestamp_millis(), &suffix[..9])
}

/// Layer types from the style format. Unknown types pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerType {
    Background,
    Fill,
    Line,
    Symbol,
    Raster,
    FillExtrusion,
    Circle,
    Heatmap,
    Hillshade,
    Sky,
    Other(String),
}

impl Default for LayerType {
    fn default() -> Self {
        LayerType::Other(String::new())
    }
}

impl LayerType {
    pub fn as_str(&self) -> &str {
        match self {
            LayerType::Background => "background",
            LayerType::Fill => "fill",
            LayerType::Line => "line",
            LayerType::Symbol => "symbol",
            LayerType::Raster => "raster",
            LayerType::FillExtrusion => "fill-extrusion",
            LayerType::Circle => "circle",
            LayerType::Heatmap => "heatmap",
            LayerType::Hillshade => "hillshade",
            LayerType::Sky => "sky",
            LayerType::Other(other) => other,
        }
    }

    /// True when the source document had no `type`.
    pub fn is_unspecified(&self) -> bool {
        matches!(self, LayerType::Other(s) if s.is_empty())
    }
}

impl From<String> for LayerType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "background" => LayerType::Background,
            "fill" => LayerType::Fill,
            "line" => LayerType::Line,
            "symbol" => LayerType::Symbol,
            "raster" => LayerType::Raster,
            "fill-extrusion" => LayerType::FillExtrusion,
            "circle" => LayerType::Circle,
            "heatmap" => LayerType::Heatmap,
            "hillshade" => LayerType::Hillshade,
            "sky" => LayerType::Sky,
            _ => LayerType::Other(value),
        }
    }
}

impl From<&str> for LayerType {
    fn from(value: &str) -> Self {
        LayerType::from(value.to_string())
    }
}

impl From<LayerType> for String {
    fn from(value: LayerType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
