//! Property tests for the filter/sort/group pipelines.
//!
//! Records are generated with proptest; each test checks one invariant that
//! must hold for any catalog, plus a few fixed checks against the built-in
//! data.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;

use toolshelf::catalog::{
    filter_articles, filter_changelog, filter_tools, group_by_date, matches_query, sort_articles,
    sort_tools, Article, Catalog, ChangeKind, ChangelogEntry, PricingTier, Selection, Tool,
    ToolSort,
};

const CATEGORIES: [&str; 4] = ["chat", "completion", "review", "testing"];

fn date(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(u64::from(offset))
}

fn tool(i: usize, name: String, category: usize, rating: f64, updated: u32) -> Tool {
    Tool {
        id: format!("tool-{}", i),
        name,
        description: String::new(),
        category: CATEGORIES[category].to_string(),
        tags: Vec::new(),
        url: format!("https://tool-{}.example.com", i),
        pricing: PricingTier::Free,
        rating,
        logo: String::new(),
        screenshots: Vec::new(),
        features: Vec::new(),
        last_updated: date(updated),
        changelog: Vec::new(),
        featured: false,
    }
}

fn arb_tools() -> impl Strategy<Value = Vec<Tool>> {
    prop::collection::vec(
        ("[A-Za-z][a-z ]{0,10}", 0..CATEGORIES.len(), 0.0f64..=5.0, 0u32..60),
        0..30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, cat, rating, updated))| tool(i, name, cat, rating, updated))
            .collect()
    })
}

fn arb_articles() -> impl Strategy<Value = Vec<Article>> {
    prop::collection::vec(
        (
            "[A-Za-z ]{1,20}",
            "[A-Za-z ]{0,20}",
            prop::collection::vec("[A-Za-z]{1,8}", 0..3),
            0..CATEGORIES.len(),
            0u32..60,
            any::<bool>(),
        ),
        0..30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(
                |(i, (title, description, tags, cat, published, featured))| Article {
                    id: format!("article-{}", i),
                    title,
                    description,
                    content: String::new(),
                    author: "Sam".to_string(),
                    publish_date: date(published),
                    read_time: "5 min read".to_string(),
                    category: CATEGORIES[cat].to_string(),
                    tags,
                    featured,
                },
            )
            .collect()
    })
}

fn arb_entries() -> impl Strategy<Value = Vec<ChangelogEntry>> {
    prop::collection::vec((0usize..5, 0u32..20), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (owner, day))| ChangelogEntry {
                id: i.to_string(),
                version: format!("1.{}.0", i),
                date: date(day),
                title: format!("Entry {}", i),
                description: String::new(),
                kind: ChangeKind::Improvement,
                tool_id: format!("tool-{}", owner),
            })
            .collect()
    })
}

fn ids<'a>(items: impl IntoIterator<Item = &'a Tool>) -> Vec<&'a str> {
    items.into_iter().map(|t| t.id.as_str()).collect()
}

// ============================================================================
// Tools
// ============================================================================

proptest! {
    #[test]
    fn category_filters_partition_the_tools(tools in arb_tools()) {
        let mut seen = 0;
        for category in CATEGORIES {
            let filtered = filter_tools(&tools, &Selection::parse(category));
            prop_assert!(filtered.iter().all(|t| t.category == category));
            seen += filtered.len();
        }
        let unmatched = filter_tools(&tools, &Selection::parse("no-such-category"));
        prop_assert!(unmatched.is_empty());
        prop_assert_eq!(seen, tools.len());
        prop_assert_eq!(filter_tools(&tools, &Selection::All).len(), tools.len());
    }

    #[test]
    fn rating_sort_is_non_increasing(tools in arb_tools()) {
        let mut view = filter_tools(&tools, &Selection::All);
        sort_tools(&mut view, ToolSort::Rating);
        prop_assert!(view.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn updated_sort_is_newest_first(tools in arb_tools()) {
        let mut view = filter_tools(&tools, &Selection::All);
        sort_tools(&mut view, ToolSort::LastUpdated);
        prop_assert!(view.windows(2).all(|w| w[0].last_updated >= w[1].last_updated));
    }

    #[test]
    fn name_sort_ignores_case(tools in arb_tools()) {
        let mut view = filter_tools(&tools, &Selection::All);
        sort_tools(&mut view, ToolSort::Name);
        prop_assert!(view
            .windows(2)
            .all(|w| w[0].name.to_lowercase() <= w[1].name.to_lowercase()));
    }

    #[test]
    fn sorting_is_a_permutation(tools in arb_tools(), key in prop_oneof![
        Just(ToolSort::Name),
        Just(ToolSort::Rating),
        Just(ToolSort::LastUpdated),
    ]) {
        let mut view = filter_tools(&tools, &Selection::All);
        sort_tools(&mut view, key);
        let mut sorted_ids = ids(view);
        sorted_ids.sort_unstable();
        let mut original_ids = ids(&tools);
        original_ids.sort_unstable();
        prop_assert_eq!(sorted_ids, original_ids);
    }
}

// ============================================================================
// Articles
// ============================================================================

proptest! {
    #[test]
    fn featured_articles_come_first(articles in arb_articles()) {
        let mut view = filter_articles(&articles, &Selection::All, "");
        sort_articles(&mut view);
        let first_plain = view.iter().position(|a| !a.featured).unwrap_or(view.len());
        prop_assert!(view[first_plain..].iter().all(|a| !a.featured));
        for w in view.windows(2) {
            if w[0].featured == w[1].featured {
                prop_assert!(w[0].publish_date >= w[1].publish_date);
            }
        }
    }

    #[test]
    fn query_matching_ignores_case(articles in arb_articles(), query in "[a-zA-Z]{1,4}") {
        for article in &articles {
            prop_assert_eq!(
                matches_query(article, &query.to_uppercase()),
                matches_query(article, &query.to_lowercase())
            );
        }
    }

    #[test]
    fn blank_query_keeps_the_category_set(
        articles in arb_articles(),
        category in 0..CATEGORIES.len(),
        blank in "[ \t]{0,3}",
    ) {
        let selection = Selection::parse(CATEGORIES[category]);
        let with_blank = filter_articles(&articles, &selection, &blank);
        let expected: Vec<&Article> = articles
            .iter()
            .filter(|a| a.category == CATEGORIES[category])
            .collect();
        prop_assert_eq!(with_blank, expected);
    }
}

// ============================================================================
// Changelog
// ============================================================================

proptest! {
    #[test]
    fn grouping_keeps_every_entry_once(entries in arb_entries(), owner in 0usize..6) {
        let selection = Selection::Only(format!("tool-{}", owner));
        let filtered = filter_changelog(&entries, &selection);
        let groups = group_by_date(filtered.iter().copied());

        let distinct: HashSet<NaiveDate> = filtered.iter().map(|e| e.date).collect();
        prop_assert_eq!(groups.len(), distinct.len());
        prop_assert!(groups.windows(2).all(|w| w[0].date > w[1].date));

        let flattened: usize = groups.iter().map(|g| g.entries.len()).sum();
        prop_assert_eq!(flattened, filtered.len());

        for group in &groups {
            prop_assert!(group.entries.iter().all(|e| e.date == group.date));
            // Input order survives within a date
            let expected: Vec<&ChangelogEntry> = filtered
                .iter()
                .copied()
                .filter(|e| e.date == group.date)
                .collect();
            prop_assert_eq!(&group.entries, &expected);
        }
    }
}

// ============================================================================
// Built-in catalog
// ============================================================================

#[test]
fn code_completion_set_is_stable_across_sort_keys() {
    let catalog = Catalog::builtin().unwrap();
    let expected: HashSet<&str> = ["github-copilot", "tabnine", "codeium"].into_iter().collect();
    for key in [ToolSort::Name, ToolSort::Rating, ToolSort::LastUpdated] {
        let view = catalog.tool_view(&Selection::parse("code-completion"), key);
        let got: HashSet<&str> = ids(view).into_iter().collect();
        assert_eq!(got, expected, "sort key {:?}", key);
    }
}

#[test]
fn builtin_search_is_case_insensitive() {
    let catalog = Catalog::builtin().unwrap();
    let upper = catalog.article_view(&Selection::All, "CURSOR");
    let lower = catalog.article_view(&Selection::All, "cursor");
    assert_eq!(upper, lower);
    assert!(!upper.is_empty());
}

#[test]
fn builtin_changelog_groups_newest_first() {
    let catalog = Catalog::builtin().unwrap();
    let groups = catalog.changelog_view(&Selection::All);
    let dates: Vec<String> = groups
        .iter()
        .map(|g| g.date.format("%Y-%m-%d").to_string())
        .collect();
    assert_eq!(
        dates,
        vec![
            "2024-01-25",
            "2024-01-22",
            "2024-01-20",
            "2024-01-18",
            "2024-01-15",
            "2024-01-10",
            "2024-01-05",
        ]
    );
    let same_day: Vec<&str> = groups[2].entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(same_day, vec!["1", "5"]);
}
