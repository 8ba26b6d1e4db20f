//! Minimal shape checks for externally loaded style documents.
//!
//! Only the three properties the editor relies on are checked. Layer
//! contents, property names and source references are not validated.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::{Result, StyleError};
use crate::style::document::{StyleDocument, STYLE_VERSION};

/// A reason a document cannot be loaded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Only version 8 styles are supported")]
    UnsupportedVersion,

    #[error("Style must have a sources object")]
    MissingSources,

    #[error("Style must have a layers array")]
    MissingOrInvalidLayers,
}

/// Check a raw JSON document. An empty result means it can be loaded.
///
/// A value that is not an object fails all three checks.
pub fn validate(document: &Value) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // 8.0 is the same number as 8.
    if document.get("version").and_then(Value::as_f64) != Some(STYLE_VERSION as f64) {
        errors.push(ValidationError::UnsupportedVersion);
    }

    if !document.get("sources").is_some_and(Value::is_object) {
        errors.push(ValidationError::MissingSources);
    }

    if !document.get("layers").is_some_and(Value::is_array) {
        errors.push(ValidationError::MissingOrInvalidLayers);
    }

    errors
}

impl StyleDocument {
    /// Validate raw JSON and type it as a style document.
    ///
    /// Fails with [`StyleError::Validation`] listing every shape problem.
    pub fn from_validated_json(raw: Value) -> Result<Self> {
        let errors = validate(&raw);
        if !errors.is_empty() {
            return Err(StyleError::Validation { errors });
        }
        Ok(serde_json::from_value(raw)?)
    }

    /// Check an already typed document.
    ///
    /// Typing guarantees `sources` and `layers` have the right shape, so only
    /// the version can fail here.
    pub fn validate(&self) -> Vec<ValidationError> {
        if self.version == STYLE_VERSION {
            Vec::new()
        } else {
            vec![ValidationError::UnsupportedVersion]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_minimal_style() {
        assert!(validate(&json!({ "version": 8, "sources": {}, "layers": [] })).is_empty());
    }

    #[test]
    fn test_rejects_old_version() {
        let errors = validate(&json!({ "version": 7, "sources": {}, "layers": [] }));
        assert_eq!(errors, vec![ValidationError::UnsupportedVersion]);
    }

    #[test]
    fn test_version_must_be_numeric_eight() {
        let errors = validate(&json!({ "version": "8", "sources": {}, "layers": [] }));
        assert!(errors.contains(&ValidationError::UnsupportedVersion));
    }

    #[test]
    fn test_accepts_float_version_eight() {
        let raw = json!({ "version": 8.0, "sources": {}, "layers": [] });
        assert!(validate(&raw).is_empty());
        assert_eq!(StyleDocument::from_validated_json(raw).unwrap().version, STYLE_VERSION);
        assert!(!validate(&json!({ "version": 8.5, "sources": {}, "layers": [] })).is_empty());
    }

    #[test]
    fn test_null_paint_and_layout_load() {
        let doc = StyleDocument::from_validated_json(json!({
            "version": 8,
            "sources": {},
            "layers": [{ "id": "water", "type": "fill", "paint": null, "layout": null }]
        }))
        .unwrap();
        assert!(doc.layers[0].paint.is_empty());
    }

    #[test]
    fn test_sources_must_be_mapping() {
        for sources in [json!([]), json!("tiles"), json!(null)] {
            let errors = validate(&json!({ "version": 8, "sources": sources, "layers": [] }));
            assert_eq!(errors, vec![ValidationError::MissingSources]);
        }
        let errors = validate(&json!({ "version": 8, "layers": [] }));
        assert_eq!(errors, vec![ValidationError::MissingSources]);
    }

    #[test]
    fn test_layers_must_be_sequence() {
        let errors = validate(&json!({ "version": 8, "sources": {}, "layers": {} }));
        assert_eq!(errors, vec![ValidationError::MissingOrInvalidLayers]);
    }

    #[test]
    fn test_non_object_fails_everything() {
        assert_eq!(validate(&json!(null)).len(), 3);
        assert_eq!(validate(&json!([1, 2])).len(), 3);
    }

    #[test]
    fn test_from_validated_json() {
        let doc = StyleDocument::from_validated_json(json!({
            "version": 8,
            "sources": {},
            "layers": [{ "id": "water", "type": "fill" }]
        }))
        .unwrap();
        assert_eq!(doc.layer_count(), 1);

        let err = StyleDocument::from_validated_json(json!({ "version": 8, "layers": [] })).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_typed_document_validation() {
        let mut doc = StyleDocument::new_empty();
        assert!(doc.validate().is_empty());
        doc.version = 7;
        assert_eq!(doc.validate(), vec![ValidationError::UnsupportedVersion]);
    }
}
