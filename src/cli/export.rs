//! `export` command: one-shot icon download without the interactive browser.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::catalog::Catalog;
use crate::cli::Commands;
use crate::config::cfg;
use crate::core::IconStyle;
use crate::export::{self, ExportFormat, ExportRequest, clamp_size};
use crate::log;

pub fn run_export(catalog: &Catalog, command: &Commands) -> Result<()> {
    let Commands::Export {
        category,
        icon,
        style,
        format,
        size,
        out,
    } = command
    else {
        unreachable!("run_export called with a non-export command");
    };

    if export::validate_icon(catalog, category, icon).is_err() {
        if !catalog.has_category(category) {
            bail!(
                "unknown category `{category}`; run `iconex categories` to see what exists"
            );
        }
        bail!("no icon `{icon}` in `{category}`; run `iconex list {category}` to see its icons");
    }

    let config = cfg();
    let style = style.unwrap_or(config.cdn.style);
    let requested = size.unwrap_or(config.export.size);
    let size = clamp_size(requested);
    if size != requested {
        log!("export"; "size {} adjusted to {}", requested, size);
    }

    let out_dir: PathBuf = out.clone().unwrap_or_else(|| config.export.dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output directory `{}`", out_dir.display()))?;

    let request = ExportRequest {
        category,
        icon,
        style,
        format: *format,
        size,
        base_url: &config.cdn.base_url,
        out_dir: &out_dir,
    };

    let path = export::export_icon(&request)
        .with_context(|| format!("failed to export `{category}/{icon}`"))?;

    log!("export"; "wrote {}", path.display());
    Ok(())
}

/// Single-export entry point reused by the browse dialog.
pub fn export_selected(
    category: &str,
    icon: &str,
    style: IconStyle,
    format: ExportFormat,
    size: u32,
) -> Result<PathBuf> {
    let config = cfg();
    std::fs::create_dir_all(&config.export.dir).with_context(|| {
        format!(
            "failed to create output directory `{}`",
            config.export.dir.display()
        )
    })?;

    let request = ExportRequest {
        category,
        icon,
        style,
        format,
        size,
        base_url: &config.cdn.base_url,
        out_dir: &config.export.dir,
    };
    Ok(export::export_icon(&request)?)
}
