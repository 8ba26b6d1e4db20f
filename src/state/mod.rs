//! State Persistence Module
//!
//! File storage for style documents. The engine itself never touches the
//! filesystem; hosts go through here.

pub mod storage;

pub use storage::{export_file_name, load_style, read_style_json, save_style};
