//! Command-line surface of the `plotline` binary

use clap::{Parser, Subcommand};
use plotline_core::models::SpatialLevel;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "plotline",
    version,
    about = "Browse and maintain the spatial land registry"
)]
pub struct Cli {
    /// Config file (defaults to ./plotline.toml, then the environment)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Node counts per level and total plot/room area
    Summary,

    /// Rows of a drill-down view
    List {
        /// Keys to drill through, outermost first
        #[arg(long = "path", value_name = "KEY", num_args = 1..)]
        path: Vec<String>,
    },

    /// Every node of one level across the whole registry
    Discover {
        #[arg(value_name = "LEVEL")]
        level: SpatialLevel,
    },

    /// Render-tree projection of a drill context
    Tree {
        #[arg(long = "path", value_name = "KEY", num_args = 1..)]
        path: Vec<String>,
    },

    /// Locate a node by client key or backend id
    Find { key: String },

    /// Lookup categories
    Categories,

    /// Values of one lookup category
    Values { code: String },

    /// Change a node's name
    Rename { key: String, name: String },

    /// Delete a node and everything beneath it
    Delete {
        key: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
