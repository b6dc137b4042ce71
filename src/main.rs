//! Iconex - A terminal browser and exporter for Material Design icons.

#![allow(dead_code)]

mod catalog;
mod cdn;
mod cli;
mod config;
mod core;
mod export;
mod logger;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{AppConfig, init_config};

use crate::catalog::Catalog;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);
    init_config(AppConfig::load(cli)?);

    let catalog = Arc::new(load_catalog(cli)?);

    match &cli.command {
        Commands::Browse { category, style } => {
            cli::browse::run_browse(catalog, category.as_deref(), *style)
        }
        Commands::Categories => cli::categories::run_categories(&catalog),
        Commands::List {
            category,
            query,
            limit,
        } => cli::list::run_list(&catalog, category, query.as_deref(), *limit),
        Commands::Export { .. } => cli::export::run_export(&catalog, &cli.command),
    }
}

/// Load the icon catalog: an explicit `--catalog` file, or the built-in one.
fn load_catalog(cli: &Cli) -> Result<Catalog> {
    match &cli.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog from `{}`", path.display())),
        None => Ok(Catalog::embedded()),
    }
}
