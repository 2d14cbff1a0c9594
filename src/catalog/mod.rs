//! The catalog: tools, their changelogs and best-practice articles, plus the
//! pure filter/sort/group pipelines the views are built from.
//!
//! Everything here is synchronous and side-effect free apart from reading a
//! catalog file in [`Catalog::load`]. A [`Catalog`] is never mutated after
//! loading; each view is recomputed from it whenever a selection changes.

mod articles;
mod changelog;
mod load;
mod selection;
mod tools;
mod types;
mod validate;

pub use articles::{
    article_category_name, article_view, empty_state_message, featured_articles, filter_articles,
    find_article, matches_query, related_articles, sort_articles,
};
pub use changelog::{
    changelog_view, filter_changelog, group_by_date, tools_with_changelogs, DateGroup,
    ToolChangelogCount,
};
pub use selection::{Selection, ALL_SENTINEL};
pub use tools::{
    category_name, featured_tools, filter_tools, sort_tools, star_rating, tool_view,
    total_category_count, Bookmarks, ParseSortError, ToolSort,
};
pub use types::{
    Article, ArticleCategory, Catalog, CatalogError, Category, ChangeKind, ChangelogEntry,
    CountMismatch, DanglingReference, PricingTier, Tool, ValidationReport,
};
