//! Static icon catalog: category → ordered list of icon names.
//!
//! The catalog is loaded once (embedded JSON by default, or a user-supplied
//! file via `--catalog`) and is read-only afterwards. Lookups for unknown
//! categories return an empty slice, never an error — the UI renders that
//! as an explicit empty state.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::path::Path;

/// Default catalog embedded in the binary.
const MATERIAL_JSON: &str = include_str!("material.json");

/// Immutable mapping of categories to ordered icon name lists.
///
/// Categories are kept sorted; icon order within a category is preserved
/// from the source (catalog order, never re-sorted).
#[derive(Debug, Clone)]
pub struct Catalog {
    groups: Vec<(String, Vec<String>)>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build from (category, icons) pairs. Categories are sorted by name;
    /// icon lists are taken as-is.
    pub fn from_groups(mut groups: Vec<(String, Vec<String>)>) -> Self {
        groups.sort_by(|a, b| a.0.cmp(&b.0));
        let index = groups
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
        Self { groups, index }
    }

    /// Parse a catalog from JSON: an object of `category -> [icon names]`.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(text).context("catalog is not a JSON object")?;

        let mut groups = Vec::with_capacity(raw.len());
        for (category, value) in raw {
            let icons: Vec<String> = serde_json::from_value(value)
                .with_context(|| format!("category `{category}` is not an array of names"))?;
            groups.push((category, icons));
        }
        Ok(Self::from_groups(groups))
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog `{}`", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("failed to parse catalog `{}`", path.display()))
    }

    /// The catalog shipped with the binary.
    pub fn embedded() -> Self {
        Self::from_json(MATERIAL_JSON).expect("embedded catalog is valid JSON")
    }

    /// Category names, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    /// Icon names for a category, in catalog order.
    /// Unknown categories yield an empty slice.
    pub fn icons(&self, category: &str) -> &[String] {
        match self.index.get(category) {
            Some(&i) => &self.groups[i].1,
            None => &[],
        }
    }

    /// Whether the catalog knows this category at all.
    pub fn has_category(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }

    /// Whether the (category, icon) pair exists.
    pub fn contains(&self, category: &str, icon: &str) -> bool {
        self.icons(category).iter().any(|name| name == icon)
    }

    /// First category name, if any. Used as the browse default.
    pub fn first_category(&self) -> Option<&str> {
        self.groups.first().map(|(name, _)| name.as_str())
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of icons across all categories.
    pub fn icon_count(&self) -> usize {
        self.groups.iter().map(|(_, icons)| icons.len()).sum()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::from_json(
            r#"{
                "navigation": ["menu", "close", "arrow_back"],
                "action": ["home", "search", "settings"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_categories_sorted() {
        let catalog = sample();
        let cats: Vec<_> = catalog.categories().collect();
        assert_eq!(cats, vec!["action", "navigation"]);
        assert_eq!(catalog.first_category(), Some("action"));
    }

    #[test]
    fn test_icon_order_preserved() {
        let catalog = sample();
        // Source order kept, not sorted
        assert_eq!(
            catalog.icons("navigation"),
            &["menu", "close", "arrow_back"]
        );
    }

    #[test]
    fn test_unknown_category_is_empty_not_error() {
        let catalog = sample();
        assert!(catalog.icons("nope").is_empty());
        assert!(!catalog.has_category("nope"));
    }

    #[test]
    fn test_contains() {
        let catalog = sample();
        assert!(catalog.contains("action", "home"));
        assert!(!catalog.contains("action", "menu"));
        assert!(!catalog.contains("nope", "home"));
    }

    #[test]
    fn test_counts() {
        let catalog = sample();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.icon_count(), 6);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(Catalog::from_json("[1, 2]").is_err());
        assert!(Catalog::from_json(r#"{"action": "home"}"#).is_err());
    }

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = Catalog::embedded();
        assert!(!catalog.is_empty());
        assert!(catalog.contains("action", "home"));
        assert!(catalog.contains("action", "search"));
        assert!(catalog.contains("action", "settings"));
        // Categories must come out sorted
        let cats: Vec<_> = catalog.categories().collect();
        let mut sorted = cats.clone();
        sorted.sort_unstable();
        assert_eq!(cats, sorted);
    }
}
