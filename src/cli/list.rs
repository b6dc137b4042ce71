//! `list` command: print icon names from one category, optionally filtered.
//!
//! Names go to stdout one per line so the output pipes cleanly; the summary
//! footer goes through the logger (stderr).

use anyhow::Result;

use crate::catalog::Catalog;
use crate::core::compute_filtered;
use crate::log;

pub fn run_list(
    catalog: &Catalog,
    category: &str,
    query: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    // An unknown category is the same empty state as a query with no
    // matches, not an error.
    if !catalog.has_category(category) {
        log!("catalog"; "no icons found (unknown category `{}`)", category);
        return Ok(());
    }

    let icons = catalog.icons(category);
    let filtered = compute_filtered(icons, query.unwrap_or(""));

    if filtered.is_empty() {
        log!("catalog"; "no icons found");
        return Ok(());
    }

    let shown = limit.unwrap_or(filtered.len()).min(filtered.len());
    for &idx in &filtered[..shown] {
        println!("{}", icons[idx]);
    }

    log!("catalog"; "showing {} of {} icons in `{}`", shown, filtered.len(), category);
    Ok(())
}
