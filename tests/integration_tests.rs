//! Integration Tests
//!
//! End-to-end flows: file on disk -> validated load -> edits -> file on disk.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use approx::assert_relative_eq;
use mapstyle::cli::commands;
use mapstyle::engine::{Action, StyleStore};
use mapstyle::state::{load_style, read_style_json, save_style};
use mapstyle::style::PropertyPath;
use mapstyle::StyleError;
use serde_json::json;
use tempfile::TempDir;

fn write_fixture(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("style.json");
    let style = json!({
        "version": 8,
        "name": "Fixture",
        "sources": { "osm": { "type": "vector", "tiles": ["https://example.com/{z}/{x}/{y}.pbf"] } },
        "glyphs": "https://example.com/fonts/{fontstack}/{range}.pbf",
        "layers": [
            { "id": "background", "type": "background", "paint": { "background-color": "#f8f4f0" } },
            { "id": "water", "type": "fill", "source": "osm", "source-layer": "water",
              "paint": { "fill-color": "#a0c8f0" } },
            { "id": "lake-outline", "type": "line", "source": "osm", "source-layer": "water",
              "paint": { "line-color": "#A0C8F0", "line-width": 1 } },
            { "id": "road", "type": "line", "source": "osm", "source-layer": "transportation",
              "minzoom": 6, "paint": { "line-color": "#ffffff" } }
        ]
    });
    fs::write(&path, serde_json::to_string_pretty(&style).unwrap()).unwrap();
    path
}

#[test]
fn test_store_edit_save_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir);

    let mut store = StyleStore::default();
    store.load_validated(read_style_json(&path).unwrap()).unwrap();
    assert!(store.dispatch(Action::toggle_visibility("road", false)));
    assert!(store.dispatch(Action::update_property(
        "water",
        PropertyPath::paint("fill-opacity"),
        json!(0.5)
    )));
    save_style(&path, store.document()).unwrap();

    let reloaded = load_style(&path).unwrap();
    assert!(!reloaded.layer_by_id("road").unwrap().is_visible());
    assert_relative_eq!(reloaded.layer_by_id("road").unwrap().minzoom.unwrap(), 6.0);
    assert_eq!(reloaded.layer_by_id("water").unwrap().paint["fill-opacity"], json!(0.5));
    assert_eq!(
        reloaded.glyphs.as_deref(),
        Some("https://example.com/fonts/{fontstack}/{range}.pbf")
    );
    assert_eq!(reloaded, **store.document());
}

#[test]
fn test_invalid_file_is_not_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.json");
    fs::write(&path, r#"{"version": 7, "sources": {}, "layers": []}"#).unwrap();

    let mut store = StyleStore::default();
    let before = Arc::clone(store.document());
    let result = store.load_validated(read_style_json(&path).unwrap());
    assert!(matches!(result, Err(StyleError::Validation { .. })));
    assert!(Arc::ptr_eq(&before, store.document()));
}

#[test]
fn test_replace_color_command_with_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir);
    let output = dir.path().join("out").join("recolored.json");

    commands::replace_color(&path, "a0c8f0", "#3366cc", "paint.line-color", Some(&output)).unwrap();

    let recolored = load_style(&output).unwrap();
    assert_eq!(
        recolored.layer_by_id("lake-outline").unwrap().paint["line-color"],
        json!("#3366cc")
    );
    // fill-color was not the targeted key.
    assert_eq!(recolored.layer_by_id("water").unwrap().paint["fill-color"], json!("#a0c8f0"));

    let original = load_style(&path).unwrap();
    assert_eq!(
        original.layer_by_id("lake-outline").unwrap().paint["line-color"],
        json!("#A0C8F0")
    );
}

#[test]
fn test_set_and_toggle_commands() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir);

    commands::set_property(&path, "road", "maxzoom", "3", None).unwrap();
    commands::set_property(&path, "road", "layout.line-cap", "round", None).unwrap();
    commands::toggle_layer(&path, "water", false, None).unwrap();

    let edited = load_style(&path).unwrap();
    let road = edited.layer_by_id("road").unwrap();
    assert_eq!(road.maxzoom, Some(3.0));
    assert_eq!(road.layout["line-cap"], json!("round"));
    assert!(!edited.layer_by_id("water").unwrap().is_visible());
}

#[test]
fn test_commands_report_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir);

    let err = commands::set_property(&path, "ghost", "minzoom", "1", None).unwrap_err();
    assert_eq!(err.error_code(), "LAYER_NOT_FOUND");

    let err = commands::set_property(&path, "road", "minzoom", "ten", None).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_VALUE");

    let err = commands::set_property(&path, "road", "id", "water", None).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_VALUE");
    assert!(load_style(&path).unwrap().layer_by_id("road").is_some());

    let err = commands::set_property(&path, "road", "metadata.note", "x", None).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_PROPERTY_PATH");

    let err = commands::replace_color(&path, "!!", "#000", "paint.line-color", None).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_COLOR");

    let err = commands::replace_color(&path, "#fff", "#000", "minzoom", None).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_PROPERTY_PATH");
}

#[test]
fn test_new_and_add_layer_commands() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.json");

    commands::new_style(&path, Some("Fresh")).unwrap();
    assert!(commands::new_style(&path, None).is_err());

    commands::add_layer(&path, "fill", Some("parks"), Some("osm"), None).unwrap();
    commands::add_layer(&path, "symbol", None, None, None).unwrap();

    let doc = load_style(&path).unwrap();
    assert_eq!(doc.name.as_deref(), Some("Fresh"));
    assert_eq!(doc.layer_count(), 2);
    assert_eq!(doc.layers[0].id, "parks");
    assert_eq!(doc.layers[0].source.as_deref(), Some("osm"));
    assert!(doc.layers[1].id.starts_with("layer_"));
    assert_eq!(doc.layers[1].layout["text-size"], json!(14));
}

#[test]
fn test_validate_and_read_only_commands() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir);

    commands::validate_style(&path).unwrap();
    commands::list_layers(&path, "").unwrap();
    commands::list_layers(&path, "nothing-matches").unwrap();
    commands::show_layer(&path, "water").unwrap();

    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{"version": 8, "layers": []}"#).unwrap();
    assert!(commands::validate_style(&bad).is_err());
}
