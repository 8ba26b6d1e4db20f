//! Property paths addressing a single value on a layer.
//!
//! Hosts pass paths as strings (`"minzoom"`, `"paint.fill-color"`); they are
//! parsed once into a [`PropertyPath`] so a typo in the group segment is
//! rejected up front instead of silently writing a new top-level field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StyleError;

/// Where on a layer a value lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PropertyPath {
    /// A top-level layer field such as `minzoom` or `source-layer`.
    Field(String),
    /// A key inside the layer's `paint` mapping.
    Paint(String),
    /// A key inside the layer's `layout` mapping.
    Layout(String),
}

impl PropertyPath {
    pub fn paint(key: impl Into<String>) -> Self {
        PropertyPath::Paint(key.into())
    }

    pub fn layout(key: impl Into<String>) -> Self {
        PropertyPath::Layout(key.into())
    }

    pub fn field(name: impl Into<String>) -> Self {
        PropertyPath::Field(name.into())
    }

    /// The last segment: field name or paint/layout key.
    pub fn key(&self) -> &str {
        match self {
            PropertyPath::Field(key) | PropertyPath::Paint(key) | PropertyPath::Layout(key) => key,
        }
    }

    /// True for `paint.*` and `layout.*` paths.
    pub fn is_property_key(&self) -> bool {
        !matches!(self, PropertyPath::Field(_))
    }
}

impl FromStr for PropertyPath {
    type Err = StyleError;

    /// Parse `"field"`, `"paint.<key>"` or `"layout.<key>"`.
    ///
    /// Everything after the first dot is kept as one key, so
    /// `"paint.a.b"` addresses the paint key `"a.b"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| StyleError::InvalidPropertyPath {
            path: s.to_string(),
            reason: reason.to_string(),
        };

        match s.split_once('.') {
            None if s.is_empty() => Err(invalid("path is empty")),
            None => Ok(PropertyPath::Field(s.to_string())),
            Some((_, "")) => Err(invalid("missing key after the group")),
            Some(("paint", key)) => Ok(PropertyPath::Paint(key.to_string())),
            Some(("layout", key)) => Ok(PropertyPath::Layout(key.to_string())),
            Some(_) => Err(invalid("only 'paint' and 'layout' can hold nested keys")),
        }
    }
}

impl TryFrom<String> for PropertyPath {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PropertyPath> for String {
    fn from(path: PropertyPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyPath::Field(name) => write!(f, "{}", name),
            PropertyPath::Paint(key) => write!(f, "paint.{}", key),
            PropertyPath::Layout(key) => write!(f, "layout.{}", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths() {
        assert_eq!(
            "minzoom".parse::<PropertyPath>().unwrap(),
            PropertyPath::field("minzoom")
        );
        assert_eq!(
            "paint.fill-color".parse::<PropertyPath>().unwrap(),
            PropertyPath::paint("fill-color")
        );
        assert_eq!(
            "layout.visibility".parse::<PropertyPath>().unwrap(),
            PropertyPath::layout("visibility")
        );
    }

    #[test]
    fn test_deep_path_keeps_compound_key() {
        let path: PropertyPath = "paint.text.halo".parse().unwrap();
        assert_eq!(path, PropertyPath::paint("text.halo"));
        assert_eq!(path.to_string(), "paint.text.halo");
    }

    #[test]
    fn test_rejects_unknown_group() {
        let err = "metadata.author".parse::<PropertyPath>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PROPERTY_PATH");
        assert!("".parse::<PropertyPath>().is_err());
        assert!("paint.".parse::<PropertyPath>().is_err());
    }

    #[test]
    fn test_serde_uses_dotted_string() {
        let path: PropertyPath = serde_json::from_str("\"layout.text-size\"").unwrap();
        assert_eq!(path, PropertyPath::layout("text-size"));
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"layout.text-size\"");
        assert!(serde_json::from_str::<PropertyPath>("\"filter.x\"").is_err());
    }
}
