//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::IconStyle;
use crate::export::ExportFormat;

/// Iconex Material icon browser CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: iconex.toml)
    #[arg(short = 'C', long, default_value = "iconex.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Load the icon catalog from a JSON file instead of the built-in one
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Browse the catalog interactively
    #[command(visible_alias = "b")]
    Browse {
        /// Category to open (default: first category)
        #[arg(short = 'g', long)]
        category: Option<String>,

        /// Icon style to start in
        #[arg(short, long, value_enum)]
        style: Option<IconStyle>,
    },

    /// Print all categories with their icon counts
    #[command(visible_alias = "c")]
    Categories,

    /// List icons in a category, optionally filtered
    #[command(visible_alias = "l")]
    List {
        /// Category name
        category: String,

        /// Case-insensitive substring filter
        #[arg(short, long)]
        query: Option<String>,

        /// Print at most this many names
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Download one icon as SVG or PNG
    #[command(visible_alias = "e")]
    Export {
        /// Category name
        category: String,

        /// Icon name
        icon: String,

        /// Icon style
        #[arg(short, long, value_enum)]
        style: Option<IconStyle>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "svg")]
        format: ExportFormat,

        /// Raster size in pixels (PNG only, 16-512)
        #[arg(short = 'z', long)]
        size: Option<u32>,

        /// Output directory
        #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
        out: Option<PathBuf>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_browse(&self) -> bool {
        matches!(self.command, Commands::Browse { .. })
    }
    pub const fn is_export(&self) -> bool {
        matches!(self.command, Commands::Export { .. })
    }
}
