//! Terminal drawing for the browse session.
//!
//! Plain crossterm command queueing, one full repaint per loop iteration.
//! Icon lists are small enough that diffing is not worth the bookkeeping.

use std::io::Write;

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use owo_colors::OwoColorize;

use super::BrowseApp;
use crate::export::ExportFormat;

/// Rows reserved outside the icon list: header, separator, status line.
const CHROME_ROWS: u16 = 3;

pub(super) fn draw(out: &mut impl Write, app: &BrowseApp) -> Result<()> {
    let (cols, rows) = terminal::size().context("failed to query terminal size")?;
    let list_rows = rows.saturating_sub(CHROME_ROWS) as usize;

    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    queue!(out, Print(header_line(app)))?;
    queue!(out, MoveTo(0, 1), Print("─".repeat(cols as usize).dimmed()))?;

    if app.view.is_empty_state() {
        queue!(out, MoveTo(2, 3), Print("no icons found".dimmed()))?;
    } else {
        draw_list(out, app, list_rows)?;
    }

    if let Some(dialog) = &app.dialog {
        draw_dialog(out, dialog, rows)?;
    }

    if let Some(status) = &app.status {
        let line = if status.error {
            format!("{}", status.text.bright_red())
        } else {
            format!("{}", status.text.bright_green())
        };
        queue!(out, MoveTo(0, rows.saturating_sub(1)), Print(line))?;
    }

    out.flush().context("failed to flush terminal output")?;
    Ok(())
}

fn header_line(app: &BrowseApp) -> String {
    let query = if app.view.raw_query().is_empty() {
        "type to filter".dimmed().to_string()
    } else {
        format!("/{}", app.view.raw_query().bright_cyan())
    };
    let settling = if app.view.is_settling() { " …" } else { "" };
    format!(
        " {}  {}  {}{}  {}",
        app.view.category().bright_blue().bold(),
        app.style.label().bright_magenta(),
        query,
        settling,
        format!(
            "showing {} of {}",
            app.view.visible_len(),
            app.view.filtered_len()
        )
        .dimmed(),
    )
}

fn draw_list(out: &mut impl Write, app: &BrowseApp, list_rows: usize) -> Result<()> {
    let names = app.view.visible_slice();

    // Keep the selection on screen
    let offset = app.selected.saturating_sub(list_rows.saturating_sub(1));

    for (row, (idx, name)) in names
        .iter()
        .enumerate()
        .skip(offset)
        .take(list_rows)
        .enumerate()
    {
        let y = 2 + row as u16;
        if idx == app.selected {
            queue!(
                out,
                MoveTo(0, y),
                Print(format!("{} {}", "▸".bright_cyan(), name.bold()))
            )?;
        } else {
            queue!(out, MoveTo(2, y), Print(name))?;
        }
    }
    Ok(())
}

fn draw_dialog(
    out: &mut impl Write,
    dialog: &crate::export::ExportDialog,
    rows: u16,
) -> Result<()> {
    let file = crate::export::file_name(&dialog.icon, dialog.format, dialog.size);
    let y = rows / 3;

    let size_line = match dialog.format {
        ExportFormat::Svg => "vector, 24px source".dimmed().to_string(),
        ExportFormat::Png => format!("{}px", dialog.size.bright_cyan()),
    };
    let state = if dialog.is_in_flight() {
        format!("  {}", "downloading…".bright_yellow())
    } else {
        String::new()
    };

    queue!(
        out,
        MoveTo(4, y),
        Clear(ClearType::CurrentLine),
        Print(format!(
            "export {}  →  {}{}",
            dialog.icon.bold(),
            file.bright_green(),
            state
        )),
        MoveTo(4, y + 1),
        Clear(ClearType::CurrentLine),
        Print(format!(
            "format: {}   size: {}",
            dialog.format.label().bright_magenta(),
            size_line
        )),
        MoveTo(4, y + 2),
        Clear(ClearType::CurrentLine),
        Print("f format   +/- size   enter download   esc close".dimmed()),
    )?;
    Ok(())
}
