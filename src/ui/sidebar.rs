use crate::app::{App, Focus, Page};
use crate::catalog::total_category_count;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Sidebar entries for the current page as `(label, count)`, "All" first.
fn entries(app: &App<'_>) -> (&'static str, Vec<(String, usize)>) {
    let catalog = app.catalog;
    match app.page {
        Page::Tools => {
            let mut rows = vec![(
                "All tools".to_string(),
                total_category_count(&catalog.categories),
            )];
            rows.extend(
                catalog
                    .categories
                    .iter()
                    .map(|c| (format!("{} {}", c.icon, c.name), c.count)),
            );
            ("Categories", rows)
        }
        Page::Articles => {
            let mut rows = vec![("All articles".to_string(), catalog.articles.len())];
            rows.extend(catalog.article_categories.iter().map(|c| {
                let count = catalog
                    .articles
                    .iter()
                    .filter(|a| a.category == c.id)
                    .count();
                (c.name.clone(), count)
            }));
            ("Topics", rows)
        }
        Page::Changelog => {
            let mut rows = vec![("All tools".to_string(), catalog.changelog.len())];
            rows.extend(
                app.changelog_tools
                    .iter()
                    .map(|t| (t.tool.name.clone(), t.count)),
            );
            ("Tools", rows)
        }
    }
}

/// Render the category / tool selector panel.
pub fn render(f: &mut Frame, app: &App<'_>, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Sidebar;
    let selected = app.sidebar_index();
    let (title, rows) = entries(app);

    let style_selected = app.style("item_selected");
    let style_active = app.style("sidebar_active");
    let style_normal = app.style("item_normal");
    let style_count = app.style("sidebar_count");

    let available = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = rows
        .into_iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let count_str = format!(" ({})", count);
            let label_width = available.saturating_sub(count_str.len());
            let label = truncate_to_width(&label, label_width).into_owned();

            let style = if i == selected && is_focused {
                style_selected
            } else if i == selected {
                style_active
            } else {
                style_normal
            };

            ListItem::new(Line::from(vec![
                Span::styled(label, style),
                Span::styled(count_str, style_count),
            ]))
        })
        .collect();

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_entries_match_sidebar_len() {
        let catalog = Catalog::builtin().unwrap();
        let mut app = App::new(&catalog);
        for page in Page::ALL {
            app.set_page(page);
            let (_, rows) = entries(&app);
            assert_eq!(rows.len(), app.sidebar_len(), "page {:?}", page);
        }
    }

    #[test]
    fn test_all_entry_counts() {
        let catalog = Catalog::builtin().unwrap();
        let mut app = App::new(&catalog);
        assert_eq!(entries(&app).1[0].1, 10);

        app.set_page(Page::Articles);
        let (_, rows) = entries(&app);
        assert_eq!(rows[0].1, 7);
        // prompting has two articles
        assert!(rows.contains(&("Prompting".to_string(), 2)));

        app.set_page(Page::Changelog);
        assert_eq!(entries(&app).1[0].1, 8);
    }
}
