use std::collections::{HashMap, HashSet};

use super::types::{Catalog, CountMismatch, DanglingReference, ValidationReport};
use crate::util::validate_url_for_open;

impl Catalog {
    /// Cross-check the catalog's internal references.
    ///
    /// Nothing here is fatal: the pipelines work on inconsistent data, they
    /// just show surprising counts or empty listings.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        let mut actual: HashMap<&str, usize> = HashMap::new();
        for tool in &self.tools {
            *actual.entry(tool.category.as_str()).or_default() += 1;
        }
        for category in &self.categories {
            let real = actual.get(category.id.as_str()).copied().unwrap_or(0);
            if real != category.count {
                report.count_mismatches.push(CountMismatch {
                    category: category.id.clone(),
                    stored: category.count,
                    actual: real,
                });
            }
        }

        let category_ids: HashSet<&str> = self.categories.iter().map(|c| c.id.as_str()).collect();
        let tool_ids: HashSet<&str> = self.tools.iter().map(|t| t.id.as_str()).collect();
        let article_category_ids: HashSet<&str> = self
            .article_categories
            .iter()
            .map(|c| c.id.as_str())
            .collect();

        for tool in &self.tools {
            if !category_ids.contains(tool.category.as_str()) {
                report.unknown_tool_categories.push(DanglingReference {
                    from: tool.id.clone(),
                    to: tool.category.clone(),
                });
            }
            if let Err(e) = validate_url_for_open(&tool.url) {
                report.invalid_urls.push((tool.id.clone(), e.to_string()));
            }
        }

        for entry in &self.changelog {
            if !tool_ids.contains(entry.tool_id.as_str()) {
                report.unknown_changelog_tools.push(DanglingReference {
                    from: entry.id.clone(),
                    to: entry.tool_id.clone(),
                });
            }
        }

        for article in &self.articles {
            if !article_category_ids.contains(article.category.as_str()) {
                report.unknown_article_categories.push(DanglingReference {
                    from: article.id.clone(),
                    to: article.category.clone(),
                });
            }
        }

        let dups = &mut report.duplicate_ids;
        collect_duplicates(dups, "category", self.categories.iter().map(|c| c.id.as_str()));
        collect_duplicates(dups, "tool", self.tools.iter().map(|t| t.id.as_str()));
        collect_duplicates(dups, "changelog", self.changelog.iter().map(|e| e.id.as_str()));
        collect_duplicates(dups, "article", self.articles.iter().map(|a| a.id.as_str()));
        collect_duplicates(
            dups,
            "article-category",
            self.article_categories.iter().map(|c| c.id.as_str()),
        );

        report
    }
}

/// Push `kind:id` once for every id seen more than once, in first-repeat order.
fn collect_duplicates<'a>(out: &mut Vec<String>, kind: &str, ids: impl Iterator<Item = &'a str>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            out.push(format!("{}:{}", kind, id));
        }
    }
}
