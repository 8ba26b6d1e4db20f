//! Layer grouping for the layer list.
//!
//! [`classify`] filters layers by a search term, buckets them into the
//! fixed [`LayerCategory`] order and sorts each bucket. It is a pure function
//! of its inputs and cheap enough to call on every redraw.

pub mod category;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::style::Layer;

pub use category::LayerCategory;

/// One non-empty bucket of layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerGroup {
    pub category: LayerCategory,
    pub key: &'static str,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub layers: Vec<Arc<Layer>>,
}

impl LayerGroup {
    fn new(category: LayerCategory, layers: Vec<Arc<Layer>>) -> Self {
        Self {
            category,
            key: category.key(),
            display_name: category.display_name(),
            icon: category.icon(),
            layers,
        }
    }

    /// Header text such as `🌊 Water`.
    pub fn title(&self) -> String {
        format!("{} {}", self.icon, self.display_name)
    }
}

/// Human readable names for layer ids, searched alongside the ids.
pub trait LayerNameTranslator {
    fn translate(&self, layer_id: &str) -> Option<String>;
}

/// Search ids only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslation;

impl LayerNameTranslator for NoTranslation {
    fn translate(&self, _layer_id: &str) -> Option<String> {
        None
    }
}

impl LayerNameTranslator for HashMap<String, String> {
    fn translate(&self, layer_id: &str) -> Option<String> {
        self.get(layer_id).cloned()
    }
}

impl<F> LayerNameTranslator for F
where
    F: Fn(&str) -> Option<String>,
{
    fn translate(&self, layer_id: &str) -> Option<String> {
        self(layer_id)
    }
}

/// Group layers by category, searching ids only.
pub fn classify(layers: &[Arc<Layer>], search_term: &str) -> Vec<LayerGroup> {
    classify_with(layers, search_term, &NoTranslation)
}

/// Group layers by category.
///
/// Layers without an id are skipped. A non-empty `search_term` keeps layers
/// whose id or translated name contains it, ignoring case. Within a group,
/// ids containing "background" come first, the rest sort by id. Empty groups
/// are left out.
pub fn classify_with<T>(layers: &[Arc<Layer>], search_term: &str, translator: &T) -> Vec<LayerGroup>
where
    T: LayerNameTranslator + ?Sized,
{
    let needle = search_term.to_lowercase();
    let mut buckets: HashMap<LayerCategory, Vec<Arc<Layer>>> = HashMap::new();

    for layer in layers.iter().filter(|l| !l.id.is_empty()) {
        let id_lower = layer.id.to_lowercase();
        if !needle.is_empty() && !matches_search(&layer.id, &id_lower, &needle, translator) {
            continue;
        }
        buckets
            .entry(LayerCategory::for_layer_id(&id_lower))
            .or_default()
            .push(Arc::clone(layer));
    }

    LayerCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let mut members = buckets.remove(&category)?;
            members.sort_by_cached_key(|l| (!l.id.to_lowercase().contains("background"), l.id.clone()));
            Some(LayerGroup::new(category, members))
        })
        .collect()
}

fn matches_search<T>(id: &str, id_lower: &str, needle: &str, translator: &T) -> bool
where
    T: LayerNameTranslator + ?Sized,
{
    id_lower.contains(needle)
        || translator
            .translate(id)
            .is_some_and(|name| name.to_lowercase().contains(needle))
}

/// Number of layers across all groups.
pub fn total_layers(groups: &[LayerGroup]) -> usize {
    groups.iter().map(|g| g.layers.len()).sum()
}
