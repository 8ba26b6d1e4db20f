//! Error handling for Mapstyle
//!
//! Engine actions never fail; these errors only come out of the
//! loading, saving and command line layers around the engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::style::validate::ValidationError;

/// Result type alias for Mapstyle operations
pub type Result<T> = std::result::Result<T, StyleError>;

/// Main error type for Mapstyle operations
#[derive(Error, Debug)]
pub enum StyleError {
    // File Errors
    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization Errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Document Errors
    #[error("Invalid style: {}", join_errors(.errors))]
    Validation { errors: Vec<ValidationError> },

    #[error("Invalid property path '{path}': {reason}")]
    InvalidPropertyPath { path: String, reason: String },

    #[error("Cannot set '{property}' on layer '{layer_id}' to {value}")]
    InvalidValue {
        layer_id: String,
        property: String,
        value: String,
    },

    #[error("Layer not found: {id}")]
    LayerNotFound { id: String },

    #[error("Invalid color: {input}")]
    InvalidColor { input: String },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl StyleError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            StyleError::FileReadError { .. } => "FILE_READ_ERROR",
            StyleError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            StyleError::Json(_) => "JSON_ERROR",
            StyleError::Validation { .. } => "VALIDATION_ERROR",
            StyleError::InvalidPropertyPath { .. } => "INVALID_PROPERTY_PATH",
            StyleError::InvalidValue { .. } => "INVALID_VALUE",
            StyleError::LayerNotFound { .. } => "LAYER_NOT_FOUND",
            StyleError::InvalidColor { .. } => "INVALID_COLOR",
        }
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StyleError::FileReadError { .. } => Some("Check the file path and try again."),
            StyleError::Json(_) => Some("Make sure the file contains a JSON style document."),
            StyleError::Validation { .. } => {
                Some("Only version 8 styles with a sources object and a layers array can be loaded.")
            }
            StyleError::InvalidPropertyPath { .. } => {
                Some("Use a top-level field like 'minzoom' or 'paint.<key>' / 'layout.<key>'.")
            }
            StyleError::InvalidValue { .. } => {
                Some("Zoom levels take numbers, and a new id must not be used by another layer.")
            }
            StyleError::LayerNotFound { .. } => {
                Some("Run the 'layers' command to list the layer ids in this style.")
            }
            StyleError::InvalidColor { .. } => {
                Some("Use #rgb, #rrggbb, #rrggbbaa or rgb(r, g, b) notation.")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = StyleError::LayerNotFound {
            id: "water".to_string(),
        };
        assert_eq!(err.error_code(), "LAYER_NOT_FOUND");
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_validation_message_lists_every_problem() {
        let err = StyleError::Validation {
            errors: vec![
                ValidationError::UnsupportedVersion,
                ValidationError::MissingSources,
            ],
        };
        let message = err.to_string();
        assert!(message.contains("version 8"));
        assert!(message.contains("sources"));
    }
}
