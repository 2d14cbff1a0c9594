//! Render functions for the TUI.
//!
//! This module handles all rendering logic, dispatching to the appropriate
//! view based on application state.

use crate::app::{App, Page, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{articles, changelog, help, reader, sidebar, status, tools};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
///
/// Routes to the appropriate view renderer based on current application state.
/// Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &mut App<'_>) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    match app.view {
        View::Browse => render_browse(f, app),
        View::Reader => render_reader(f, app),
    }

    // Help overlay goes on top of any view
    if app.show_help {
        help::render(f, app);
    }
}

/// Render the browse view: page tabs, sidebar + page content, status bar.
fn render_browse(f: &mut Frame, app: &App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tabs(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(chunks[1]);

    sidebar::render(f, app, main_chunks[0]);
    match app.page {
        Page::Tools => tools::render(f, app, main_chunks[1]),
        Page::Articles => articles::render(f, app, main_chunks[1]),
        Page::Changelog => changelog::render(f, app, main_chunks[1]),
    }

    status::render(f, app, chunks[2]);
}

/// One-line page switcher: ` toolshelf  1 Tools  2 Articles  3 Changelog`.
fn render_tabs(f: &mut Frame, app: &App<'_>, area: Rect) {
    let mut spans = vec![Span::styled(" toolshelf ", app.style("panel_title"))];
    for (i, page) in Page::ALL.into_iter().enumerate() {
        spans.push(Span::raw(" "));
        let style = if page == app.page {
            app.style("tab_active")
        } else {
            app.style("tab_inactive")
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, page.title()), style));
    }
    if !app.bookmarks.is_empty() {
        spans.push(Span::styled(
            format!("  ◆ {} bookmarked", app.bookmarks.len()),
            app.style("bookmark_marker"),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the reader view (article content + status bar).
fn render_reader(f: &mut Frame, app: &mut App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    reader::render(f, app, chunks[0]);
    status::render(f, app, chunks[1]);
}
