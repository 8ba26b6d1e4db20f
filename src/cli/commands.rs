//! CLI Command Implementations
//!
//! Each command loads the style through the validating loader, runs its
//! edit through a [`StyleStore`] and writes the result back.

use std::io;
use std::path::Path;

use log::{debug, info, warn};
use serde_json::Value;

use crate::classify::{classify, total_layers};
use crate::engine::{Action, StyleStore};
use crate::error::{Result, StyleError};
use crate::state::{read_style_json, save_style};
use crate::style::{
    generate_layer_id, normalize_color, normalize_color_input, validate, Layer, LayerType,
    PropertyPath, StyleDocument,
};

/// Write a new empty style document.
pub fn new_style(path: &Path, name: Option<&str>) -> Result<()> {
    info!("Creating new style at: {}", path.display());

    if path.exists() {
        return Err(StyleError::FileWriteError {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "file already exists"),
        });
    }

    let mut document = StyleDocument::new_empty();
    if let Some(name) = name {
        document.name = Some(name.to_string());
    }
    save_style(path, &document)?;

    println!("Style created: {}", path.display());
    Ok(())
}

/// Check a style file and report every problem.
pub fn validate_style(path: &Path) -> Result<()> {
    info!("Validating style: {}", path.display());

    let raw = read_style_json(path)?;
    let errors = validate(&raw);
    if errors.is_empty() {
        println!("{}: OK", path.display());
        return Ok(());
    }

    for error in &errors {
        println!("{}: {}", path.display(), error);
    }
    Err(StyleError::Validation { errors })
}

/// Print layers grouped by category.
pub fn list_layers(path: &Path, search: &str) -> Result<()> {
    let store = open_store(path)?;
    let groups = classify(&store.document().layers, search);

    println!("Layers ({})", total_layers(&groups));
    if groups.is_empty() {
        if search.is_empty() {
            println!("No layers found");
        } else {
            println!("No layers found for \"{}\"", search);
        }
        return Ok(());
    }

    for group in &groups {
        println!("{} ({})", group.title(), group.layers.len());
        for layer in &group.layers {
            let hidden = if layer.is_visible() { "" } else { " [hidden]" };
            println!("    {} <{}>{}", layer.id, layer.layer_type, hidden);
        }
    }
    Ok(())
}

/// Print every property of one layer.
pub fn show_layer(path: &Path, layer_id: &str) -> Result<()> {
    let store = open_store(path)?;
    let layer = find_layer(store.document(), layer_id)?;

    println!("{:-<60}", "");
    for (key, value) in layer.flattened_properties() {
        println!("{:<32} {}", key, value);
    }
    println!("{:-<60}", "");
    println!("Visible: {}", layer.is_visible());
    Ok(())
}

/// Show or hide a layer.
pub fn toggle_layer(path: &Path, layer_id: &str, visible: bool, output: Option<&Path>) -> Result<()> {
    info!("Setting visibility of '{}' to {}", layer_id, visible);

    let mut store = open_store(path)?;
    find_layer(store.document(), layer_id)?;
    store.dispatch(Action::toggle_visibility(layer_id, visible));
    commit(&store, path, output)
}

/// Set one property on a layer.
pub fn set_property(
    path: &Path,
    layer_id: &str,
    property: &str,
    value: &str,
    output: Option<&Path>,
) -> Result<()> {
    let property: PropertyPath = property.parse()?;
    let value = parse_value_arg(value);
    info!("Setting {} on '{}' to {}", property, layer_id, value);

    let mut store = open_store(path)?;
    find_layer(store.document(), layer_id)?;
    if !store.dispatch(Action::update_property(layer_id, property.clone(), value.clone())) {
        return Err(StyleError::InvalidValue {
            layer_id: layer_id.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        });
    }
    commit(&store, path, output)
}

/// Replace a color across all layers.
pub fn replace_color(
    path: &Path,
    from: &str,
    to: &str,
    property: &str,
    output: Option<&Path>,
) -> Result<()> {
    let property: PropertyPath = property.parse()?;
    if !property.is_property_key() {
        return Err(StyleError::InvalidPropertyPath {
            path: property.to_string(),
            reason: "colors can only be replaced under paint or layout".to_string(),
        });
    }
    let from = color_arg(from)?;
    let to = color_arg(to)?;
    info!("Replacing {} with {} under {}", from, to, property);

    let mut store = open_store(path)?;
    let before = store.document().clone();
    if !store.dispatch(Action::replace_color(from.as_str(), to.as_str(), property)) {
        println!("No layers use {}.", from);
        return Ok(());
    }

    let changed = before
        .layers
        .iter()
        .zip(&store.document().layers)
        .filter(|(old, new)| !std::sync::Arc::ptr_eq(old, new))
        .count();
    println!("Updated {} layer(s).", changed);
    commit(&store, path, output)
}

/// Append a template layer.
pub fn add_layer(
    path: &Path,
    layer_type: &str,
    id: Option<&str>,
    source: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let id = id.map(str::to_string).unwrap_or_else(generate_layer_id);
    let layer = Layer::template(LayerType::from(layer_type), id.as_str(), source);
    info!("Adding {} layer '{}'", layer.layer_type, id);

    let mut store = open_store(path)?;
    if !store.dispatch(Action::add_layer(layer)) {
        warn!("A layer with id '{}' already exists", id);
        return Ok(());
    }
    println!("Added layer: {}", id);
    commit(&store, path, output)
}

fn open_store(path: &Path) -> Result<StyleStore> {
    let raw = read_style_json(path)?;
    let mut store = StyleStore::default();
    store.subscribe(|state| {
        debug!("Document now has {} layers", state.document.layer_count());
    });
    store.load_validated(raw)?;
    Ok(store)
}

fn find_layer<'a>(document: &'a StyleDocument, layer_id: &str) -> Result<&'a Layer> {
    document
        .layer_by_id(layer_id)
        .map(|layer| layer.as_ref())
        .ok_or_else(|| StyleError::LayerNotFound {
            id: layer_id.to_string(),
        })
}

fn commit(store: &StyleStore, input: &Path, output: Option<&Path>) -> Result<()> {
    let target = output.unwrap_or(input);
    save_style(target, store.document())?;
    println!("Saved: {}", target.display());
    Ok(())
}

/// JSON when it parses, otherwise the raw text as a string.
fn parse_value_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn color_arg(input: &str) -> Result<String> {
    let fixed = normalize_color_input(input);
    if normalize_color(input).is_none() && fixed == "#000000" {
        return Err(StyleError::InvalidColor {
            input: input.to_string(),
        });
    }
    Ok(fixed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value_arg() {
        assert_eq!(parse_value_arg("0.5"), json!(0.5));
        assert_eq!(parse_value_arg("[\"get\", \"name\"]"), json!(["get", "name"]));
        assert_eq!(parse_value_arg("none"), json!("none"));
    }

    #[test]
    fn test_color_arg() {
        assert_eq!(color_arg("ff0000").unwrap(), "#ff0000");
        assert_eq!(color_arg("rgb(0, 0, 0)").unwrap(), "rgb(0, 0, 0)");
        assert!(color_arg("!!").is_err());
    }
}
