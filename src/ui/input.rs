//! Input handling for the TUI.
//!
//! This module processes keyboard input and dispatches to the appropriate
//! handler based on current view and mode.

use crate::app::{App, Focus, Page, View};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::util::{validate_url_for_open, MAX_SEARCH_QUERY_LENGTH};
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

/// Map the current focus panel to a keybinding context for context-specific lookups.
fn focus_to_context(focus: Focus) -> KbContext {
    match focus {
        Focus::Sidebar => KbContext::Sidebar,
        Focus::List => KbContext::List,
    }
}

/// Main input dispatch function.
///
/// Routes input to the appropriate handler based on current mode and view.
pub(super) fn handle_input(app: &mut App<'_>, code: KeyCode, modifiers: KeyModifiers) -> Action {
    // Help overlay captures all keys when visible
    if app.show_help {
        return handle_help_input(app, code);
    }

    if app.search_mode {
        return handle_search_input(app, code, modifiers);
    }

    match app.view {
        View::Browse => handle_browse_input(app, code, modifiers),
        View::Reader => handle_reader_input(app, code, modifiers),
    }
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App<'_>, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input in browse view (sidebar + list panels).
fn handle_browse_input(app: &mut App<'_>, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let context = focus_to_context(app.focus);
    let action = app.keybindings.action_for_key(code, modifiers, context);

    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::Back) => {
            // Priority: list → sidebar, then drop filters
            if app.focus == Focus::List {
                app.focus = Focus::Sidebar;
            } else {
                app.clear_filters();
            }
        }
        Some(KbAction::NavDown) => app.nav_down(),
        Some(KbAction::NavUp) => app.nav_up(),
        Some(KbAction::CycleFocus) => app.cycle_focus(),
        Some(KbAction::Select) => handle_enter_key(app),
        Some(KbAction::ShowTools) => app.set_page(Page::Tools),
        Some(KbAction::ShowArticles) => app.set_page(Page::Articles),
        Some(KbAction::ShowChangelog) => app.set_page(Page::Changelog),
        Some(KbAction::NextPage) => app.set_page(app.page.next()),
        Some(KbAction::PrevPage) => app.set_page(app.page.prev()),
        Some(KbAction::CycleSort) => {
            if app.page == Page::Tools {
                let label = app.cycle_sort();
                app.set_status(format!("Sort: {}", label));
            } else {
                app.set_status("Sorting applies to the tool list");
            }
        }
        Some(KbAction::ToggleBookmark) => {
            if app.page != Page::Tools {
                app.set_status("Only tools can be bookmarked");
            } else if let Some((tool, on)) = app.toggle_bookmark() {
                if on {
                    app.set_status(format!("Bookmarked {}", tool.name));
                } else {
                    app.set_status(format!("Removed bookmark from {}", tool.name));
                }
            }
        }
        Some(KbAction::EnterSearch) => app.enter_search(),
        Some(KbAction::ClearFilters) => {
            app.clear_filters();
            app.set_status("Filters cleared");
        }
        Some(KbAction::OpenInBrowser) => open_selected_tool(app),
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        _ => {}
    }
    Action::Continue
}

/// Enter: a category in the sidebar moves focus to the list; a tool jumps to
/// its changelog; an article opens in the reader.
fn handle_enter_key(app: &mut App<'_>) {
    if app.focus == Focus::Sidebar {
        app.focus = Focus::List;
        return;
    }

    match app.page {
        Page::Tools => {
            if let Some(tool) = app.selected_tool() {
                if !app.show_changelog_for(tool) {
                    app.set_status(format!("No changelog entries for {}", tool.name));
                }
            }
        }
        Page::Articles => {
            if !app.enter_reader() {
                app.set_status("No article selected");
            }
        }
        Page::Changelog => open_selected_tool(app),
    }
}

/// Open the selected tool's website (on the changelog page, the entry's tool).
fn open_selected_tool(app: &mut App<'_>) {
    let Some(tool) = app.selected_tool_for_open() else {
        app.set_status("Nothing to open here");
        return;
    };

    // Validate before handing the URL to the platform opener
    match validate_url_for_open(&tool.url) {
        Err(e) => app.set_status(format!("Refusing to open {}: {}", tool.name, e)),
        Ok(url) => {
            if let Err(e) = open::that(url.as_str()) {
                tracing::warn!(url = %url, error = %e, "Failed to open browser");
                app.set_status(format!("Failed to open browser: {}", e));
            } else {
                app.set_status(format!("Opening {}...", tool.name));
            }
        }
    }
}

/// Handle input in the full-screen reader.
pub(super) fn handle_reader_input(
    app: &mut App<'_>,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Action {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Reader);

    match action {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::ExitReader) | Some(KbAction::Back) => app.exit_reader(),
        Some(KbAction::ScrollDown) | Some(KbAction::NavDown) => app.scroll_down(1),
        Some(KbAction::ScrollUp) | Some(KbAction::NavUp) => app.scroll_up(1),
        Some(KbAction::PageDown) => {
            let page = app.reader_visible_lines.max(1);
            app.scroll_down(page);
        }
        Some(KbAction::PageUp) => {
            let page = app.reader_visible_lines.max(1);
            app.scroll_up(page);
        }
        Some(KbAction::CycleFocus) => app.cycle_related(),
        Some(KbAction::Select) => {
            if !app.open_related() {
                app.set_status("No related articles");
            }
        }
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input while typing a search query.
///
/// Printable keys edit the query; the view recomputes on every keystroke.
fn handle_search_input(app: &mut App<'_>, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match code {
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if !app.push_search_char(c) {
                app.set_status(format!(
                    "Search query at max length ({} chars)",
                    MAX_SEARCH_QUERY_LENGTH
                ));
            }
        }
        _ => match app
            .keybindings
            .action_for_key(code, modifiers, KbContext::Search)
        {
            Some(KbAction::ExitSearch) => app.cancel_search(),
            Some(KbAction::CommitSearch) => app.commit_search(),
            _ => {}
        },
    }
    Action::Continue
}
