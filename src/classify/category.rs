//! Fixed layer categories and the id keywords that select them.

use serde::{Deserialize, Serialize};

/// Semantic bucket for the layer list, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerCategory {
    Background,
    Land,
    Water,
    Transportation,
    Buildings,
    Boundaries,
    Labels,
    Other,
}

impl LayerCategory {
    /// All categories in display and matching order.
    pub const ALL: [LayerCategory; 8] = [
        LayerCategory::Background,
        LayerCategory::Land,
        LayerCategory::Water,
        LayerCategory::Transportation,
        LayerCategory::Buildings,
        LayerCategory::Boundaries,
        LayerCategory::Labels,
        LayerCategory::Other,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LayerCategory::Background => "background",
            LayerCategory::Land => "land",
            LayerCategory::Water => "water",
            LayerCategory::Transportation => "transportation",
            LayerCategory::Buildings => "buildings",
            LayerCategory::Boundaries => "boundaries",
            LayerCategory::Labels => "labels",
            LayerCategory::Other => "other",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LayerCategory::Background => "Background",
            LayerCategory::Land => "Land & Nature",
            LayerCategory::Water => "Water",
            LayerCategory::Transportation => "Transportation",
            LayerCategory::Buildings => "Buildings",
            LayerCategory::Boundaries => "Boundaries",
            LayerCategory::Labels => "Labels & Text",
            LayerCategory::Other => "Other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            LayerCategory::Background => "🌌",
            LayerCategory::Land => "🌍",
            LayerCategory::Water => "🌊",
            LayerCategory::Transportation => "🚗",
            LayerCategory::Buildings => "🏢",
            LayerCategory::Boundaries => "🗺️",
            LayerCategory::Labels => "🔤",
            LayerCategory::Other => "📦",
        }
    }

    /// Lowercase substrings that put a layer id in this category.
    /// `Other` has none; it takes whatever nothing else claimed.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            LayerCategory::Background => &["background"],
            LayerCategory::Land => &[
                "land", "park", "wood", "grass", "forest", "natural", "green", "sand", "glacier",
                "farm",
            ],
            LayerCategory::Water => &["water", "river", "ocean", "lake", "sea", "stream", "canal"],
            LayerCategory::Transportation => &[
                "road",
                "street",
                "motorway",
                "highway",
                "bridge",
                "tunnel",
                "transport",
                "path",
                "rail",
                "aeroway",
                "link",
                "service",
                "track",
                "pedestrian",
            ],
            LayerCategory::Buildings => &["building", "house", "construction", "roof"],
            LayerCategory::Boundaries => &["boundary", "border", "admin"],
            LayerCategory::Labels => &["label", "text", "name", "symbol", "poi", "place"],
            LayerCategory::Other => &[],
        }
    }

    /// Category for an already lowercased layer id. The first category whose
    /// keywords match wins.
    pub fn for_layer_id(id_lower: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|category| category.keywords().iter().any(|k| id_lower.contains(k)))
            .unwrap_or(LayerCategory::Other)
    }
}
