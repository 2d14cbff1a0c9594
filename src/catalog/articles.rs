use super::selection::Selection;
use super::types::{Article, ArticleCategory, Catalog};

/// Case-insensitive substring match of `query` against an article's title,
/// description or any tag.
///
/// The query is trimmed first; an empty or whitespace-only query matches
/// every article.
pub fn matches_query(article: &Article, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    matches_lowercase(article, &needle)
}

fn matches_lowercase(article: &Article, needle: &str) -> bool {
    article.title.to_lowercase().contains(needle)
        || article.description.to_lowercase().contains(needle)
        || article
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Apply the category filter, then the text filter.
pub fn filter_articles<'a>(
    articles: &'a [Article],
    selection: &Selection,
    query: &str,
) -> Vec<&'a Article> {
    let query = query.trim();
    let needle = query.to_lowercase();
    articles
        .iter()
        .filter(|a| selection.matches(&a.category))
        .filter(|a| needle.is_empty() || matches_lowercase(a, &needle))
        .collect()
}

/// Featured articles first; within the same featured status, newest first.
/// Stable, so equal dates keep catalog order.
pub fn sort_articles(articles: &mut [&Article]) {
    articles.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| b.publish_date.cmp(&a.publish_date))
    });
}

/// Category filter, text filter, then featured-first ordering.
pub fn article_view<'a>(
    articles: &'a [Article],
    selection: &Selection,
    query: &str,
) -> Vec<&'a Article> {
    let mut view = filter_articles(articles, selection, query);
    sort_articles(&mut view);
    tracing::debug!(
        selection = %selection,
        query = %query.trim(),
        matched = view.len(),
        "Recomputed article view"
    );
    view
}

pub fn featured_articles(articles: &[Article]) -> Vec<&Article> {
    articles.iter().filter(|a| a.featured).collect()
}

pub fn find_article<'a>(articles: &'a [Article], id: &str) -> Option<&'a Article> {
    articles.iter().find(|a| a.id == id)
}

/// Other articles in the same category or sharing at least one tag, in
/// catalog order, capped at `limit`.
pub fn related_articles<'a>(
    articles: &'a [Article],
    article: &Article,
    limit: usize,
) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|a| a.id != article.id)
        .filter(|a| a.category == article.category || a.tags.iter().any(|t| article.tags.contains(t)))
        .take(limit)
        .collect()
}

/// Heading for the article list.
pub fn article_category_name<'a>(categories: &'a [ArticleCategory], selection: &Selection) -> &'a str {
    match selection {
        Selection::All => "All articles",
        Selection::Only(id) => categories
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or("Articles"),
    }
}

/// Message shown when a listing comes back empty.
pub fn empty_state_message(query: &str) -> &'static str {
    if query.trim().is_empty() {
        "No articles yet"
    } else {
        "No matching articles"
    }
}

impl Catalog {
    pub fn article_view(&self, selection: &Selection, query: &str) -> Vec<&Article> {
        article_view(&self.articles, selection, query)
    }

    pub fn find_article(&self, id: &str) -> Option<&Article> {
        find_article(&self.articles, id)
    }
}
