//! `categories` command: print every category with its icon count.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::catalog::Catalog;

pub fn run_categories(catalog: &Catalog) -> Result<()> {
    let width = catalog
        .categories()
        .map(str::len)
        .max()
        .unwrap_or(0);

    for category in catalog.categories() {
        let count = catalog.icons(category).len();
        println!("{category:width$}  {}", count.dimmed());
    }

    crate::log!(
        "catalog";
        "{} categories, {} icons",
        catalog.len(),
        catalog.icon_count()
    );
    Ok(())
}
