use crate::app::{App, Focus};
use crate::catalog::{ChangeKind, ChangelogEntry};
use crate::util::{display_width, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Style for a change-kind badge.
pub(super) fn kind_style(app: &App<'_>, kind: ChangeKind) -> Style {
    match kind {
        ChangeKind::Feature => app.style("kind_feature"),
        ChangeKind::Improvement => app.style("kind_improvement"),
        ChangeKind::Bugfix => app.style("kind_bugfix"),
        ChangeKind::Breaking => app.style("kind_breaking"),
    }
}

/// Render the date-grouped changelog timeline.
///
/// Date headers are list rows too, so the entry cursor is translated to a
/// row index before it is handed to `ListState`.
pub fn render(f: &mut Frame, app: &App<'_>, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::List;
    let available_width = area.width.saturating_sub(2) as usize;

    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_row = 0;
    let mut entry_index = 0;

    for group in &app.changelog {
        items.push(ListItem::new(Line::from(Span::styled(
            group.date.format("%Y-%m-%d").to_string(),
            app.style("date_header"),
        ))));
        for entry in &group.entries {
            if entry_index == app.selected_entry {
                selected_row = items.len();
            }
            let selected = entry_index == app.selected_entry;
            items.push(ListItem::new(entry_line(app, entry, selected, available_width)));
            entry_index += 1;
        }
    }

    if items.is_empty() {
        items.push(ListItem::new(Span::styled(
            "No changelog entries",
            app.style("empty_state"),
        )));
    }

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let heading = app
        .changelog_selection
        .id()
        .and_then(|id| app.catalog.find_tool(id))
        .map(|t| t.name.as_str())
        .unwrap_or("All tools");
    let title = format!("Changelog · {} ({})", heading, app.changelog_entry_count());

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected(Some(selected_row));
    f.render_stateful_widget(list, area, &mut state);
}

fn entry_line<'l>(
    app: &App<'_>,
    entry: &'l ChangelogEntry,
    selected: bool,
    available_width: usize,
) -> Line<'l> {
    let tool_name = app
        .catalog
        .find_tool(&entry.tool_id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| entry.tool_id.clone());

    let badge = format!("  {} {:<15}", entry.kind.glyph(), entry.kind.label());
    let meta = format!(" {} v{} ", tool_name, entry.version);
    let title_width = available_width
        .saturating_sub(display_width(&badge))
        .saturating_sub(display_width(&meta));

    let title_style = if selected {
        app.style("item_selected")
    } else {
        app.style("item_normal")
    };

    Line::from(vec![
        Span::styled(badge, kind_style(app, entry.kind)),
        Span::styled(meta, app.style("item_meta")),
        Span::styled(truncate_to_width(&entry.title, title_width), title_style),
    ])
}
