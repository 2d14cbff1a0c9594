use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::selection::Selection;
use super::types::{Catalog, Category, Tool};

// ============================================================================
// Sort Key
// ============================================================================

/// How the tool list is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToolSort {
    /// Ascending by name, case-insensitive.
    Name,
    /// Highest rated first.
    #[default]
    Rating,
    /// Most recently updated first.
    LastUpdated,
}

#[derive(Debug, Error)]
#[error("Unknown sort key '{0}' (expected name, rating or updated)")]
pub struct ParseSortError(String);

impl FromStr for ToolSort {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "rating" => Ok(Self::Rating),
            "updated" | "last-updated" | "last_updated" | "lastupdated" => Ok(Self::LastUpdated),
            _ => Err(ParseSortError(s.to_owned())),
        }
    }
}

impl fmt::Display for ToolSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Rating => "rating",
            Self::LastUpdated => "updated",
        })
    }
}

impl ToolSort {
    /// Cycle Name → Rating → LastUpdated → Name.
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Rating,
            Self::Rating => Self::LastUpdated,
            Self::LastUpdated => Self::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Rating => "Rating",
            Self::LastUpdated => "Recently updated",
        }
    }

    fn compare(self, a: &Tool, b: &Tool) -> Ordering {
        match self {
            Self::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            Self::Rating => b.rating.total_cmp(&a.rating),
            Self::LastUpdated => b.last_updated.cmp(&a.last_updated),
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Keep the tools in the selected category. `Selection::All` keeps everything.
pub fn filter_tools<'a>(tools: &'a [Tool], selection: &Selection) -> Vec<&'a Tool> {
    tools
        .iter()
        .filter(|tool| selection.matches(&tool.category))
        .collect()
}

/// Order tools in place. Stable: ties keep their incoming order.
pub fn sort_tools(tools: &mut [&Tool], key: ToolSort) {
    tools.sort_by(|a, b| key.compare(a, b));
}

/// Filter by category, then sort.
pub fn tool_view<'a>(tools: &'a [Tool], selection: &Selection, key: ToolSort) -> Vec<&'a Tool> {
    let mut view = filter_tools(tools, selection);
    sort_tools(&mut view, key);
    tracing::debug!(
        selection = %selection,
        sort = %key,
        matched = view.len(),
        "Recomputed tool view"
    );
    view
}

/// Curated tools, in catalog order.
pub fn featured_tools(tools: &[Tool]) -> Vec<&Tool> {
    tools.iter().filter(|tool| tool.featured).collect()
}

/// Heading for the tool list. `None` when the selected id is unknown.
pub fn category_name<'a>(categories: &'a [Category], selection: &Selection) -> Option<&'a str> {
    match selection {
        Selection::All => Some("All tools"),
        Selection::Only(id) => categories
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.name.as_str()),
    }
}

/// Sum of the declared category counts, shown beside the "All" entry.
pub fn total_category_count(categories: &[Category]) -> usize {
    categories.iter().map(|c| c.count).sum()
}

/// Five-slot star rating: full stars for the integer part, one half star when
/// there is a fractional part, empty stars for the rest.
pub fn star_rating(rating: f64) -> String {
    let rating = if rating.is_finite() {
        rating.clamp(0.0, 5.0)
    } else {
        0.0
    };
    let full = rating.floor() as usize;
    let half = rating.fract() != 0.0;
    let empty = 5 - rating.ceil() as usize;

    let mut out = String::with_capacity(5 * 3);
    out.push_str(&"★".repeat(full));
    if half {
        out.push('◐');
    }
    out.push_str(&"☆".repeat(empty));
    out
}

impl Catalog {
    pub fn tool_view(&self, selection: &Selection, key: ToolSort) -> Vec<&Tool> {
        tool_view(&self.tools, selection, key)
    }

    pub fn find_tool(&self, id: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id == id)
    }
}

// ============================================================================
// Bookmarks
// ============================================================================

/// Transient set of bookmarked tool ids. Lives for the session only.
#[derive(Debug, Clone, Default)]
pub struct Bookmarks {
    ids: HashSet<String>,
}

impl Bookmarks {
    /// Flip the bookmark on `id`. Returns whether it is now bookmarked.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_owned());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn ids(tools: &[&Tool]) -> Vec<String> {
        tools.iter().map(|t| t.id.clone()).collect()
    }

    fn tool(id: &str, name: &str, rating: f64, updated: &str) -> Tool {
        Tool {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: "misc".to_string(),
            tags: Vec::new(),
            url: format!("https://{}.example.com", id),
            pricing: crate::catalog::PricingTier::Free,
            rating,
            logo: String::new(),
            screenshots: Vec::new(),
            features: Vec::new(),
            last_updated: NaiveDate::parse_from_str(updated, "%Y-%m-%d").unwrap(),
            changelog: Vec::new(),
            featured: false,
        }
    }

    #[test]
    fn test_code_completion_by_rating() {
        let catalog = catalog();
        let view = catalog.tool_view(&Selection::parse("code-completion"), ToolSort::Rating);
        assert_eq!(ids(&view), vec!["github-copilot", "codeium", "tabnine"]);
    }

    #[test]
    fn test_code_completion_by_name() {
        let catalog = catalog();
        let view = catalog.tool_view(&Selection::parse("code-completion"), ToolSort::Name);
        assert_eq!(ids(&view), vec!["codeium", "github-copilot", "tabnine"]);
    }

    #[test]
    fn test_code_completion_by_last_updated() {
        let catalog = catalog();
        let view = catalog.tool_view(&Selection::parse("code-completion"), ToolSort::LastUpdated);
        assert_eq!(ids(&view), vec!["codeium", "tabnine", "github-copilot"]);
    }

    #[test]
    fn test_all_selection_keeps_everything() {
        let catalog = catalog();
        let view = catalog.tool_view(&Selection::All, ToolSort::Rating);
        assert_eq!(view.len(), catalog.tools.len());
        assert_eq!(view[0].id, "github-copilot");
        assert_eq!(view.last().unwrap().id, "sourcery");
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let catalog = catalog();
        let view = catalog.tool_view(&Selection::parse("no-such-category"), ToolSort::Name);
        assert!(view.is_empty());
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let tools = vec![
            tool("b", "beta", 1.0, "2024-01-01"),
            tool("a", "Alpha", 1.0, "2024-01-01"),
            tool("c", "Charlie", 1.0, "2024-01-01"),
        ];
        let view = tool_view(&tools, &Selection::All, ToolSort::Name);
        assert_eq!(ids(&view), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rating_ties_keep_catalog_order() {
        let tools = vec![
            tool("first", "Z", 4.0, "2024-01-01"),
            tool("top", "Y", 5.0, "2024-01-01"),
            tool("second", "X", 4.0, "2024-01-01"),
        ];
        let view = tool_view(&tools, &Selection::All, ToolSort::Rating);
        assert_eq!(ids(&view), vec!["top", "first", "second"]);
    }

    #[test]
    fn test_featured_tools() {
        let catalog = catalog();
        let featured = featured_tools(&catalog.tools);
        assert_eq!(ids(&featured), vec!["github-copilot", "cursor"]);
    }

    #[test]
    fn test_category_name() {
        let catalog = catalog();
        assert_eq!(
            category_name(&catalog.categories, &Selection::All),
            Some("All tools")
        );
        assert_eq!(
            category_name(&catalog.categories, &Selection::parse("testing")),
            Some("Test Generation")
        );
        assert_eq!(
            category_name(&catalog.categories, &Selection::parse("nope")),
            None
        );
    }

    #[test]
    fn test_total_category_count_matches_tools() {
        let catalog = catalog();
        assert_eq!(total_category_count(&catalog.categories), catalog.tools.len());
    }

    #[test]
    fn test_sort_parse_and_cycle() {
        assert_eq!("name".parse::<ToolSort>().unwrap(), ToolSort::Name);
        assert_eq!("RATING".parse::<ToolSort>().unwrap(), ToolSort::Rating);
        assert_eq!("updated".parse::<ToolSort>().unwrap(), ToolSort::LastUpdated);
        assert_eq!(
            "last-updated".parse::<ToolSort>().unwrap(),
            ToolSort::LastUpdated
        );
        assert!("stars".parse::<ToolSort>().is_err());

        assert_eq!(ToolSort::Name.next(), ToolSort::Rating);
        assert_eq!(ToolSort::Rating.next(), ToolSort::LastUpdated);
        assert_eq!(ToolSort::LastUpdated.next(), ToolSort::Name);
        assert_eq!(ToolSort::default(), ToolSort::Rating);
    }

    #[test]
    fn test_star_rating() {
        assert_eq!(star_rating(4.8), "★★★★◐");
        assert_eq!(star_rating(4.0), "★★★★☆");
        assert_eq!(star_rating(5.0), "★★★★★");
        assert_eq!(star_rating(0.0), "☆☆☆☆☆");
        assert_eq!(star_rating(2.5), "★★◐☆☆");
        // Out-of-range values are clamped
        assert_eq!(star_rating(7.0), "★★★★★");
        assert_eq!(star_rating(-1.0), "☆☆☆☆☆");
        assert_eq!(star_rating(f64::NAN), "☆☆☆☆☆");
    }

    #[test]
    fn test_bookmarks_toggle() {
        let mut bookmarks = Bookmarks::default();
        assert!(bookmarks.is_empty());
        assert!(bookmarks.toggle("cursor"));
        assert!(bookmarks.contains("cursor"));
        assert_eq!(bookmarks.len(), 1);
        assert!(!bookmarks.toggle("cursor"));
        assert!(!bookmarks.contains("cursor"));
        assert!(bookmarks.is_empty());
    }
}
