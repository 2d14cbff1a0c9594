//! Headless listings for `--list`: run one pipeline and format the result as
//! plain text or JSON.

use clap::ValueEnum;
use serde_json::json;
use std::fmt::Write as _;

use crate::catalog::{
    article_category_name, category_name, empty_state_message, star_rating, Catalog, Selection,
    ToolSort,
};

/// Which listing to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Tools,
    Articles,
    Changelog,
}

/// Everything a listing can be narrowed by. Each kind reads only the fields
/// that apply to it.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    /// Tool category (tools) or article category (articles).
    pub category: Selection,
    pub sort: ToolSort,
    pub query: String,
    /// Owning tool (changelog).
    pub tool: Selection,
    pub json: bool,
}

/// Format the requested listing.
pub fn render(catalog: &Catalog, kind: ListKind, req: &ListRequest) -> serde_json::Result<String> {
    match (kind, req.json) {
        (ListKind::Tools, false) => Ok(tools_text(catalog, req)),
        (ListKind::Articles, false) => Ok(articles_text(catalog, req)),
        (ListKind::Changelog, false) => Ok(changelog_text(catalog, req)),
        (ListKind::Tools, true) => {
            serde_json::to_string_pretty(&catalog.tool_view(&req.category, req.sort))
        }
        (ListKind::Articles, true) => {
            serde_json::to_string_pretty(&catalog.article_view(&req.category, &req.query))
        }
        (ListKind::Changelog, true) => {
            let groups: Vec<_> = catalog
                .changelog_view(&req.tool)
                .into_iter()
                .map(|g| json!({ "date": g.date, "entries": g.entries }))
                .collect();
            serde_json::to_string_pretty(&groups)
        }
    }
}

fn tools_text(catalog: &Catalog, req: &ListRequest) -> String {
    let tools = catalog.tool_view(&req.category, req.sort);
    let heading = category_name(&catalog.categories, &req.category).unwrap_or("Unknown category");

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}) sorted by {}",
        heading,
        tools.len(),
        req.sort.label()
    );
    for tool in tools {
        let _ = writeln!(
            out,
            "{} {:.1}  {:<8}  {:<16}  {}",
            star_rating(tool.rating),
            tool.rating,
            tool.pricing.label(),
            tool.id,
            tool.name
        );
    }
    out
}

fn articles_text(catalog: &Catalog, req: &ListRequest) -> String {
    let articles = catalog.article_view(&req.category, &req.query);
    let heading = article_category_name(&catalog.article_categories, &req.category);

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", heading, articles.len());
    if articles.is_empty() {
        let _ = writeln!(out, "{}", empty_state_message(&req.query));
    }
    for article in articles {
        let marker = if article.featured { "★" } else { " " };
        let _ = writeln!(
            out,
            "{} {}  {}  ({}, {})",
            marker,
            article.publish_date.format("%Y-%m-%d"),
            article.title,
            article.author,
            article.read_time
        );
    }
    out
}

fn changelog_text(catalog: &Catalog, req: &ListRequest) -> String {
    let mut out = String::new();
    for group in catalog.changelog_view(&req.tool) {
        let _ = writeln!(out, "{}", group.date.format("%Y-%m-%d"));
        for entry in group.entries {
            let _ = writeln!(
                out,
                "  {:<15}  {} v{}  {}",
                entry.kind.label(),
                entry.tool_id,
                entry.version,
                entry.title
            );
        }
    }
    if out.is_empty() {
        out.push_str("No changelog entries\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_tools_text_lists_category() {
        let req = ListRequest {
            category: Selection::parse("code-completion"),
            sort: ToolSort::Name,
            ..Default::default()
        };
        let out = render(&catalog(), ListKind::Tools, &req).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "AI Code Completion (3) sorted by Name");
        assert!(lines[1].ends_with("Codeium"));
        assert!(lines[2].ends_with("GitHub Copilot"));
        assert!(lines[3].ends_with("Tabnine"));
    }

    #[test]
    fn test_articles_text_empty_query_message() {
        let req = ListRequest {
            query: "no such article anywhere".to_string(),
            ..Default::default()
        };
        let out = render(&catalog(), ListKind::Articles, &req).unwrap();
        assert_eq!(out, "All articles (0)\nNo matching articles\n");
    }

    #[test]
    fn test_changelog_text_groups_by_date() {
        let req = ListRequest {
            tool: Selection::parse("cursor"),
            ..Default::default()
        };
        let out = render(&catalog(), ListKind::Changelog, &req).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "2024-01-20");
        assert!(lines[1].contains("Cursor Chat 2.0"));
        assert!(lines[2].contains("Cursor chat context fix"));
    }

    #[test]
    fn test_changelog_text_unknown_tool() {
        let req = ListRequest {
            tool: Selection::parse("nope"),
            ..Default::default()
        };
        let out = render(&catalog(), ListKind::Changelog, &req).unwrap();
        assert_eq!(out, "No changelog entries\n");
    }

    #[test]
    fn test_tools_json() {
        let req = ListRequest {
            json: true,
            ..Default::default()
        };
        let out = render(&catalog(), ListKind::Tools, &req).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let tools = value.as_array().unwrap();
        assert_eq!(tools.len(), 10);
        assert_eq!(tools[0]["id"], "github-copilot");
        assert_eq!(tools[0]["pricing"], "paid");
    }

    #[test]
    fn test_changelog_json_shape() {
        let req = ListRequest {
            json: true,
            ..Default::default()
        };
        let out = render(&catalog(), ListKind::Changelog, &req).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let groups = value.as_array().unwrap();
        assert_eq!(groups[0]["date"], "2024-01-25");
        assert_eq!(groups[0]["entries"][0]["type"], "feature");
        let total: usize = groups
            .iter()
            .map(|g| g["entries"].as_array().unwrap().len())
            .sum();
        assert_eq!(total, 8);
    }
}
