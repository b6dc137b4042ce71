//! `browse` command: interactive catalog browser.
//!
//! Single-threaded event loop. The poll timeout is derived from the query
//! debouncer so a settling query wakes the loop exactly when its quiet
//! period elapses; when idle the loop blocks on input.

mod render;

use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use crate::catalog::Catalog;
use crate::config::cfg;
use crate::core::{IconStyle, IconView};
use crate::export::ExportDialog;

/// Rows from the bottom of the revealed window at which more icons load.
/// The terminal analogue of a near-bottom scroll threshold.
const NEAR_BOTTOM_ROWS: usize = 8;

// =============================================================================
// Terminal guard
// =============================================================================

/// Raw mode and alternate screen, restored on drop so a panic or early
/// return cannot leave the terminal unusable.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable terminal raw mode")?;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)
            .context("failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, cursor::Show);
    }
}

// =============================================================================
// Session state
// =============================================================================

/// A status line shown under the icon list until the next action.
struct Status {
    text: String,
    error: bool,
}

/// Everything the browse session tracks outside the [`IconView`] itself.
pub(crate) struct BrowseApp {
    view: IconView,
    style: IconStyle,
    selected: usize,
    dialog: Option<ExportDialog>,
    status: Option<Status>,
    quit: bool,
}

impl BrowseApp {
    fn new(view: IconView, style: IconStyle) -> Self {
        Self {
            view,
            style,
            selected: 0,
            dialog: None,
            status: None,
            quit: false,
        }
    }

    /// Name of the currently selected icon, if any icon is visible.
    fn selected_icon(&self) -> Option<String> {
        self.view
            .visible_slice()
            .get(self.selected)
            .map(|name| name.to_string())
    }

    fn set_status(&mut self, text: String, error: bool) {
        self.status = Some(Status { text, error });
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }

        if self.dialog.is_some() {
            self.handle_dialog_key(key);
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.view.raw_query().is_empty() {
                    self.quit = true;
                } else {
                    self.view.input_query("", now);
                }
            }
            KeyCode::Char(c) => {
                let mut raw = self.view.raw_query().to_string();
                raw.push(c);
                self.view.input_query(&raw, now);
            }
            KeyCode::Backspace => {
                let mut raw = self.view.raw_query().to_string();
                if raw.pop().is_some() {
                    self.view.input_query(&raw, now);
                }
            }
            KeyCode::Tab => self.cycle_category(1),
            KeyCode::BackTab => self.cycle_category(-1),
            KeyCode::Right => self.style = self.style.next(),
            KeyCode::Left => self.style = self.style.prev(),
            KeyCode::Down => self.selection_down(),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Enter => {
                // The target icon is fixed here; a recompute underneath the
                // open dialog must not retarget it
                if let Some(icon) = self.selected_icon() {
                    self.dialog = Some(ExportDialog::new(icon, cfg().export.size));
                    self.status = None;
                }
            }
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.dialog = None;
            }
            KeyCode::Char('f') => dialog.toggle_format(),
            KeyCode::Char('+') | KeyCode::Char('=') => dialog.size_up(),
            KeyCode::Char('-') => dialog.size_down(),
            KeyCode::Enter => self.run_export(),
            _ => {}
        }
    }

    /// Run the export for the current selection, blocking the loop.
    ///
    /// A second Enter while a download runs is ignored; the flag is cleared
    /// whether the export succeeds or fails.
    fn run_export(&mut self) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        if !dialog.try_begin() {
            return;
        }

        let icon = dialog.icon.clone();
        let format = dialog.format;
        let size = dialog.size;
        let result = crate::cli::export::export_selected(
            self.view.category(),
            &icon,
            self.style,
            format,
            size,
        );

        if let Some(dialog) = self.dialog.as_mut() {
            dialog.finish();
        }
        match result {
            Ok(path) => {
                self.set_status(format!("saved {}", path.display()), false);
                self.dialog = None;
            }
            Err(err) => self.set_status(format!("export failed: {err:#}"), true),
        }
    }

    fn cycle_category(&mut self, step: isize) {
        let categories: Vec<&str> = self.view.catalog().categories().collect();
        if categories.is_empty() {
            return;
        }
        let current = categories
            .iter()
            .position(|c| *c == self.view.category())
            .unwrap_or(0);
        let next =
            (current as isize + step).rem_euclid(categories.len() as isize) as usize;
        let category = categories[next].to_string();

        self.view.set_category(&category);
        self.selected = 0;
        self.status = None;
    }

    fn selection_down(&mut self) {
        let visible = self.view.visible_len();
        if visible == 0 {
            return;
        }
        if self.selected + 1 < visible {
            self.selected += 1;
        }
        // Reveal more once the selection closes in on the window's end
        if visible.saturating_sub(self.selected) <= NEAR_BOTTOM_ROWS {
            self.view.scroll_near_bottom();
        }
    }
}

// =============================================================================
// Entry point
// =============================================================================

pub fn run_browse(
    catalog: Arc<Catalog>,
    category: Option<&str>,
    style: Option<IconStyle>,
) -> Result<()> {
    let config = cfg();

    let start_category = match category {
        Some(name) => {
            if !catalog.has_category(name) {
                bail!("unknown category `{name}`; run `iconex categories` to see what exists");
            }
            name.to_string()
        }
        None => catalog
            .first_category()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("the catalog has no categories"))?,
    };

    let view = IconView::new(Arc::clone(&catalog), &start_category)
        .with_paging(config.browse.initial_visible, config.browse.load_increment)
        .with_quiet(Duration::from_millis(config.browse.debounce_ms));
    let mut app = BrowseApp::new(view, style.unwrap_or(config.cdn.style));

    let _guard = TerminalGuard::enter()?;
    let mut out = stdout();

    while !app.quit {
        render::draw(&mut out, &app)?;

        let timeout = app.view.sleep_duration(Instant::now());
        if event::poll(timeout).context("terminal event poll failed")? {
            match event::read().context("terminal event read failed")? {
                Event::Key(key) => app.handle_key(key, Instant::now()),
                Event::Resize(..) => {}
                _ => {}
            }
        }

        // Apply a settled query; the selection follows the cursor reset
        if app.view.tick(Instant::now()) {
            app.selected = 0;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::export::ExportFormat;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> BrowseApp {
        let catalog = Arc::new(Catalog::from_groups(vec![
            (
                "action".into(),
                vec!["home".into(), "search".into(), "settings".into()],
            ),
            ("av".into(), vec!["play_arrow".into()]),
        ]));
        let view = IconView::new(Arc::clone(&catalog), "action");
        BrowseApp::new(view, IconStyle::Filled)
    }

    #[test]
    fn test_typing_feeds_the_query() {
        let mut app = app();
        let t0 = Instant::now();
        app.handle_key(key(KeyCode::Char('s')), t0);
        app.handle_key(key(KeyCode::Char('e')), t0);
        assert_eq!(app.view.raw_query(), "se");

        app.handle_key(key(KeyCode::Backspace), t0);
        assert_eq!(app.view.raw_query(), "s");
    }

    #[test]
    fn test_esc_clears_query_before_quitting() {
        let mut app = app();
        let t0 = Instant::now();
        app.handle_key(key(KeyCode::Char('s')), t0);
        app.handle_key(key(KeyCode::Esc), t0);
        assert_eq!(app.view.raw_query(), "");
        assert!(!app.quit);

        app.handle_key(key(KeyCode::Esc), t0);
        assert!(app.quit);
    }

    #[test]
    fn test_tab_cycles_categories_and_wraps() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab), Instant::now());
        assert_eq!(app.view.category(), "av");
        app.handle_key(key(KeyCode::Tab), Instant::now());
        assert_eq!(app.view.category(), "action");
        app.handle_key(key(KeyCode::BackTab), Instant::now());
        assert_eq!(app.view.category(), "av");
    }

    #[test]
    fn test_style_cycling() {
        let mut app = app();
        app.handle_key(key(KeyCode::Right), Instant::now());
        assert_eq!(app.style, IconStyle::Outlined);
        app.handle_key(key(KeyCode::Left), Instant::now());
        app.handle_key(key(KeyCode::Left), Instant::now());
        assert_eq!(app.style, IconStyle::TwoTone);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app();
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Down), Instant::now());
        }
        assert_eq!(app.selected, 2);
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Up), Instant::now());
        }
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_enter_opens_dialog_and_esc_closes_it() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter), Instant::now());
        assert!(app.dialog.is_some());

        app.handle_key(key(KeyCode::Char('f')), Instant::now());
        assert_eq!(app.dialog.as_ref().unwrap().format, ExportFormat::Png);

        app.handle_key(key(KeyCode::Esc), Instant::now());
        assert!(app.dialog.is_none());
        assert!(!app.quit);
    }

    #[test]
    fn test_dialog_target_survives_query_settling() {
        let mut app = app();
        let t0 = Instant::now();

        // Query still pending when the dialog opens on the top selection
        app.handle_key(key(KeyCode::Char('s')), t0);
        app.handle_key(key(KeyCode::Char('e')), t0);
        app.handle_key(key(KeyCode::Enter), t0);
        assert_eq!(app.dialog.as_ref().unwrap().icon, "home");

        // The quiet window elapses underneath the open dialog
        assert!(app.view.tick(t0 + Duration::from_millis(300)));
        app.selected = 0;
        assert_eq!(app.selected_icon().as_deref(), Some("search"));

        // The dialog still targets the icon it was opened on
        assert_eq!(app.dialog.as_ref().unwrap().icon, "home");
    }

    #[test]
    fn test_dialog_size_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter), Instant::now());
        app.handle_key(key(KeyCode::Char('+')), Instant::now());
        app.handle_key(key(KeyCode::Char('+')), Instant::now());
        app.handle_key(key(KeyCode::Char('-')), Instant::now());
        assert_eq!(app.dialog.as_ref().unwrap().size, 144);
    }

    #[test]
    fn test_ctrl_c_quits_even_in_dialog() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter), Instant::now());
        app.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(app.quit);
    }
}
