//! CLI Module
//!
//! Command-line interface for editing style documents.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mapstyle - edit vector map style documents
#[derive(Parser, Debug)]
#[command(name = "mapstyle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a new empty style document
    #[command(name = "new")]
    New {
        /// Path for the new style file
        path: PathBuf,

        /// Style name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Check that a file is a loadable style document
    #[command(name = "validate")]
    Validate {
        /// Path to the style file
        path: PathBuf,
    },

    /// List layers grouped by category
    #[command(name = "layers")]
    Layers {
        /// Path to the style file
        path: PathBuf,

        /// Only show layers whose id contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show every property of one layer
    #[command(name = "show")]
    Show {
        /// Path to the style file
        path: PathBuf,

        /// Layer id
        layer: String,
    },

    /// Show or hide a layer
    #[command(name = "toggle")]
    Toggle {
        /// Path to the style file
        path: PathBuf,

        /// Layer id
        layer: String,

        /// Hide the layer instead of showing it
        #[arg(long)]
        hide: bool,

        /// Write the result here instead of back to the input file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Set one property on a layer
    #[command(name = "set")]
    Set {
        /// Path to the style file
        path: PathBuf,

        /// Layer id
        layer: String,

        /// Property path, e.g. minzoom or paint.fill-color
        property: String,

        /// New value as JSON; bare words are taken as strings
        value: String,

        /// Write the result here instead of back to the input file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace a color under one property across all layers
    #[command(name = "replace-color")]
    ReplaceColor {
        /// Path to the style file
        path: PathBuf,

        /// Color to replace
        from: String,

        /// Replacement color
        to: String,

        /// Property path, e.g. paint.fill-color
        property: String,

        /// Write the result here instead of back to the input file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Append a new layer built from a starter template
    #[command(name = "add-layer")]
    AddLayer {
        /// Path to the style file
        path: PathBuf,

        /// Layer type (background, fill, line, symbol, ...)
        #[arg(short = 't', long = "type")]
        layer_type: String,

        /// Layer id (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Source name
        #[arg(long)]
        source: Option<String>,

        /// Write the result here instead of back to the input file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
