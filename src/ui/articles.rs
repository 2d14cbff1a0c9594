use crate::app::{App, Focus};
use crate::catalog::{article_category_name, empty_state_message, featured_articles, Article};
use crate::util::{display_width, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the Articles page: featured strip (unfiltered view only), search
/// bar (while a query is active) and the article list.
pub fn render(f: &mut Frame, app: &App<'_>, area: Rect) {
    let featured = featured_articles(&app.catalog.articles);
    let show_strip = app.show_featured
        && app.article_selection.is_all()
        && app.search_input.trim().is_empty()
        && !featured.is_empty();

    let area = if show_strip {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        render_featured(f, app, &featured, chunks[0]);
        chunks[1]
    } else {
        area
    };

    let list_area = if app.search_mode || !app.search_input.is_empty() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        render_search_bar(f, app, chunks[0]);
        chunks[1]
    } else {
        area
    };

    render_list(f, app, list_area);
}

fn render_featured(f: &mut Frame, app: &App<'_>, featured: &[&Article], area: Rect) {
    let mut spans = Vec::with_capacity(featured.len() * 2);
    for article in featured {
        spans.push(Span::styled("★ ", app.style("featured_marker")));
        spans.push(Span::styled(
            format!("{}   ", article.title),
            app.style("item_title"),
        ));
    }

    let strip = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border"))
            .title("Featured articles"),
    );
    f.render_widget(strip, area);
}

fn render_search_bar(f: &mut Frame, app: &App<'_>, area: Rect) {
    let cursor = if app.search_mode { "_" } else { "" };
    let border_style = if app.search_mode {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let bar = Paragraph::new(Line::from(vec![
        Span::styled("/ ", app.style("search_bar")),
        Span::raw(format!("{}{}", app.search_input, cursor)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Search"),
    );
    f.render_widget(bar, area);
}

/// Render the article list panel
fn render_list(f: &mut Frame, app: &App<'_>, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::List;
    let available_width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = if app.articles.is_empty() {
        vec![ListItem::new(Span::styled(
            empty_state_message(&app.search_input),
            app.style("empty_state"),
        ))]
    } else {
        app.articles
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let marker = if article.featured {
                    Span::styled("★ ", app.style("featured_marker"))
                } else {
                    Span::raw("  ")
                };

                let date = article.publish_date.format("%b %d").to_string();
                let max_title = available_width
                    .saturating_sub(2)
                    .saturating_sub(display_width(&date) + 2);
                let title = truncate_to_width(&article.title, max_title);
                let padding = available_width
                    .saturating_sub(2)
                    .saturating_sub(display_width(&title))
                    .saturating_sub(display_width(&date));

                let title_style = if i == app.selected_article {
                    app.style("item_selected")
                } else {
                    app.style("item_title")
                };

                let byline = format!(
                    "  {} · {} · {}",
                    article.author, article.read_time, article.description
                );

                ListItem::new(vec![
                    Line::from(vec![
                        marker,
                        Span::styled(title.into_owned(), title_style),
                        Span::raw(" ".repeat(padding)),
                        Span::styled(date, app.style("item_meta")),
                    ]),
                    Line::from(Span::styled(
                        truncate_to_width(&byline, available_width).into_owned(),
                        app.style("item_meta"),
                    )),
                ])
            })
            .collect()
    };

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let heading = article_category_name(&app.catalog.article_categories, &app.article_selection);
    let title = format!("{} ({})", heading, app.articles.len());

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected(Some(app.selected_article));
    f.render_stateful_widget(list, area, &mut state);
}
