use crate::app::{App, Focus};
use crate::catalog::{category_name, featured_tools, star_rating, Tool};
use crate::util::{display_width, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::changelog::kind_style;

/// Render the Tools page: optional featured strip, tool list and detail pane.
pub fn render(f: &mut Frame, app: &App<'_>, area: Rect) {
    let featured = featured_tools(&app.catalog.tools);
    let show_strip = app.show_featured && app.tool_selection.is_all() && !featured.is_empty();

    let body = if show_strip {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        render_featured(f, app, &featured, chunks[0]);
        chunks[1]
    } else {
        area
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(body);

    render_list(f, app, chunks[0]);
    render_detail(f, app, chunks[1]);
}

fn render_featured(f: &mut Frame, app: &App<'_>, featured: &[&Tool], area: Rect) {
    let mut spans = Vec::with_capacity(featured.len() * 2);
    for tool in featured {
        spans.push(Span::styled("★ ", app.style("featured_marker")));
        spans.push(Span::styled(format!("{}   ", tool.name), app.style("item_title")));
    }

    let strip = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border"))
            .title("Featured"),
    );
    f.render_widget(strip, area);
}

fn render_list(f: &mut Frame, app: &App<'_>, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::List;
    let available_width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = if app.tools.is_empty() {
        vec![ListItem::new(Span::styled(
            "No tools in this category",
            app.style("empty_state"),
        ))]
    } else {
        app.tools
            .iter()
            .enumerate()
            .map(|(i, tool)| {
                let marker = if app.bookmarks.contains(&tool.id) {
                    Span::styled("◆ ", app.style("bookmark_marker"))
                } else if tool.featured {
                    Span::styled("★ ", app.style("featured_marker"))
                } else {
                    Span::raw("  ")
                };

                let stars = star_rating(tool.rating);
                let suffix = format!(" {} {}", stars, tool.pricing.label());
                let name_width = available_width
                    .saturating_sub(2)
                    .saturating_sub(display_width(&suffix));
                let name = truncate_to_width(&tool.name, name_width);
                let padding = name_width.saturating_sub(display_width(&name));

                let name_style = if i == app.selected_tool {
                    app.style("item_selected")
                } else {
                    app.style("item_title")
                };

                ListItem::new(Line::from(vec![
                    marker,
                    Span::styled(format!("{}{}", name, " ".repeat(padding)), name_style),
                    Span::styled(format!(" {}", stars), app.style("rating_stars")),
                    Span::styled(format!(" {}", tool.pricing.label()), app.style("item_meta")),
                ]))
            })
            .collect()
    };

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let heading = category_name(&app.catalog.categories, &app.tool_selection).unwrap_or("Tools");
    let title = format!(
        "{} ({}) · {}",
        heading,
        app.tools.len(),
        app.tool_sort.label()
    );

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected(Some(app.selected_tool));
    f.render_stateful_widget(list, area, &mut state);
}

/// Detail pane for the selected tool, including its latest changelog entries.
fn render_detail(f: &mut Frame, app: &App<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title("Details");

    let Some(tool) = app.selected_tool() else {
        let empty = Paragraph::new(Span::styled("Nothing selected", app.style("empty_state")))
            .block(block);
        f.render_widget(empty, area);
        return;
    };

    let meta = app.style("item_meta");
    let mut lines = vec![
        Line::from(Span::styled(tool.name.clone(), app.style("reader_heading"))),
        Line::from(Span::styled(tool.description.clone(), app.style("reader_body"))),
        Line::from(""),
        Line::from(vec![
            Span::styled(star_rating(tool.rating), app.style("rating_stars")),
            Span::styled(format!(" {:.1}", tool.rating), meta),
        ]),
        Line::from(Span::styled(
            format!("Pricing: {}", tool.pricing.label()),
            meta,
        )),
        Line::from(Span::styled(
            format!("Updated: {}", tool.last_updated.format("%Y-%m-%d")),
            meta,
        )),
    ];

    if !tool.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Tags: {}", tool.tags.join(", ")),
            meta,
        )));
    }
    if app.bookmarks.contains(&tool.id) {
        lines.push(Line::from(Span::styled(
            "◆ Bookmarked",
            app.style("bookmark_marker"),
        )));
    }

    if !tool.features.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Features",
            app.style("reader_strong"),
        )));
        for feature in &tool.features {
            lines.push(Line::from(format!("  • {}", feature)));
        }
    }

    let recent = app.recent_changes(tool);
    if !recent.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Recent changes",
            app.style("reader_strong"),
        )));
        for entry in recent {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", entry.kind.glyph()), kind_style(app, entry.kind)),
                Span::styled(format!("{} ", entry.date.format("%Y-%m-%d")), meta),
                Span::raw(format!("v{} {}", entry.version, entry.title)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(tool.url.clone(), app.style("reader_link"))));

    let detail = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(detail, area);
}
