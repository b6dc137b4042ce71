//! Filter/paginate controller for the icon browser.
//!
//! Owns the active category's icon list, the raw and settled (debounced)
//! query, and the visible-window cursor. The filtered list is derived,
//! never stored authoritatively: it is recomputed deterministically from
//! (active list, settled query) whenever either changes.
//!
//! State machine, informally:
//! 1. category change      → (new category, "", INITIAL_VISIBLE)
//! 2. query settles        → (category, new query, INITIAL_VISIBLE)
//! 3. scroll-near-bottom   → cursor = min(cursor + VISIBLE_INCREMENT, filtered len)

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::Catalog;
use crate::core::debounce::QueryDebouncer;

/// Visible-window cursor after a category or query change.
pub const INITIAL_VISIBLE: usize = 100;

/// Cursor growth per near-bottom scroll signal.
pub const VISIBLE_INCREMENT: usize = 50;

/// Stable, case-insensitive substring filter.
///
/// Empty query returns the full index range (catalog order preserved);
/// otherwise the subsequence of icons whose name contains `query`
/// case-insensitively, original order kept.
pub fn compute_filtered(icons: &[String], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..icons.len()).collect();
    }
    let needle = query.to_lowercase();
    icons
        .iter()
        .enumerate()
        .filter(|(_, name)| name.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

/// Browsing state for one UI session.
pub struct IconView {
    catalog: Arc<Catalog>,
    category: String,
    /// Active list: replaced wholesale on category change, never mutated.
    icons: Vec<String>,
    /// Raw query, updated on every keystroke (for display).
    raw_query: String,
    /// Settled query actually used for filtering.
    query: String,
    debouncer: QueryDebouncer,
    /// Indices into `icons`, derived from (icons, query).
    filtered: Vec<usize>,
    /// Visible-window cursor. May exceed the filtered length after a
    /// reset; reads clamp it.
    visible: usize,
    initial: usize,
    increment: usize,
}

impl IconView {
    pub fn new(catalog: Arc<Catalog>, category: &str) -> Self {
        let mut view = Self {
            catalog,
            category: String::new(),
            icons: Vec::new(),
            raw_query: String::new(),
            query: String::new(),
            debouncer: QueryDebouncer::new(),
            filtered: Vec::new(),
            visible: INITIAL_VISIBLE,
            initial: INITIAL_VISIBLE,
            increment: VISIBLE_INCREMENT,
        };
        view.set_category(category);
        view
    }

    /// Override page sizes (from `[browse]` config).
    pub fn with_paging(mut self, initial: usize, increment: usize) -> Self {
        self.initial = initial.max(1);
        self.increment = increment.max(1);
        self.visible = self.initial;
        self
    }

    /// Override the debounce quiet window (from `[browse]` config).
    pub fn with_quiet(mut self, quiet: Duration) -> Self {
        self.debouncer = QueryDebouncer::with_quiet(quiet);
        self
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Switch to a category: replaces the active list wholesale, clears the
    /// query, and resets the cursor to the initial page size.
    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_string();
        self.icons = self.catalog.icons(category).to_vec();
        self.raw_query.clear();
        self.query.clear();
        self.debouncer.cancel();
        self.filtered = (0..self.icons.len()).collect();
        self.visible = self.initial;
    }

    /// Record a query edit at `at`. The raw value shows immediately;
    /// filtering waits for the debounce window.
    pub fn input_query(&mut self, raw: &str, at: Instant) {
        self.raw_query = raw.to_string();
        self.debouncer.note_input(raw, at);
    }

    /// Advance time: apply the settled query if its quiet window elapsed.
    ///
    /// Returns true if the filtered list was recomputed (cursor reset,
    /// view conceptually scrolled to top).
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(settled) = self.debouncer.take_if_settled(now) else {
            return false;
        };
        if settled == self.query {
            return false;
        }
        self.query = settled;
        self.filtered = compute_filtered(&self.icons, &self.query);
        self.visible = self.initial;
        true
    }

    /// Near-bottom scroll signal: grow the window if more icons remain.
    /// No-op when the window already covers the filtered list.
    pub fn scroll_near_bottom(&mut self) {
        if self.visible < self.filtered.len() {
            self.visible = (self.visible + self.increment).min(self.filtered.len());
        }
    }

    // ------------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------------

    /// The first `visible` filtered icon names.
    pub fn visible_slice(&self) -> Vec<&str> {
        let end = self.visible.min(self.filtered.len());
        self.filtered[..end]
            .iter()
            .map(|&i| self.icons[i].as_str())
            .collect()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// The settled query currently driving the filter.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Effective visible length: cursor clamped to the filtered length.
    pub fn visible_len(&self) -> usize {
        self.visible.min(self.filtered.len())
    }

    /// Raw cursor value (may exceed the filtered length after a reset).
    pub fn visible_cursor(&self) -> usize {
        self.visible
    }

    /// Total icons in the active category.
    pub fn total_len(&self) -> usize {
        self.icons.len()
    }

    /// Empty category and no-match query both land here; the UI shows the
    /// same explicit empty state for either.
    pub fn is_empty_state(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Whether a query edit is waiting for its quiet window.
    pub fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Event-poll timeout until the next debounce deadline.
    pub fn sleep_duration(&self, now: Instant) -> Duration {
        self.debouncer.sleep_duration(now)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}

// =============================================================================
// Tests
// =============================================================================
