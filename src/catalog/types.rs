use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while loading a catalog.
///
/// Only loading can fail. Once a `Catalog` exists, every filter, sort and
/// grouping operation over it is total.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Catalog file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Enumerations
// ============================================================================

/// A tool's cost model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    Free,
    Freemium,
    Paid,
}

impl PricingTier {
    /// Human-readable label for list and detail views.
    pub fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Freemium => "Freemium",
            Self::Paid => "Paid",
        }
    }
}

/// Classification of a changelog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Feature,
    Improvement,
    Bugfix,
    Breaking,
}

impl ChangeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Feature => "New feature",
            Self::Improvement => "Improvement",
            Self::Bugfix => "Bug fix",
            Self::Breaking => "Breaking change",
        }
    }

    /// Single glyph shown in front of timeline entries.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Feature => "✨",
            Self::Improvement => "⚡",
            Self::Bugfix => "🐛",
            Self::Breaking => "⚠",
        }
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A tool category shown in the sidebar.
///
/// `count` is the precomputed number of tools in this category. It is meant to
/// match the tool list but nothing enforces that; see `Catalog::validate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub count: usize,
}

/// A single changelog entry owned by a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    pub id: String,
    pub version: String,
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Owning tool. May be omitted for entries nested under a tool in a
    /// catalog file; loading fills it in.
    #[serde(default)]
    pub tool_id: String,
}

/// A catalogued developer tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub url: String,
    pub pricing: PricingTier,
    pub rating: f64,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub last_updated: NaiveDate,
    /// Entries declared inline with the tool. Loading also merges these into
    /// the catalog-wide changelog feed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changelog: Vec<ChangelogEntry>,
    #[serde(default)]
    pub featured: bool,
}

/// A best-practice article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Markdown body.
    pub content: String,
    pub author: String,
    pub publish_date: NaiveDate,
    /// Free-form estimate such as "8 min read".
    pub read_time: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCategory {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// The complete, immutable dataset every pipeline reads from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub tools: Vec<Tool>,
    /// Catalog-wide changelog feed, including entries merged from tools.
    pub changelog: Vec<ChangelogEntry>,
    pub articles: Vec<Article>,
    pub article_categories: Vec<ArticleCategory>,
}

// ============================================================================
// Validation Report
// ============================================================================

/// A category whose stored count disagrees with the tool list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMismatch {
    pub category: String,
    pub stored: usize,
    pub actual: usize,
}

/// A record pointing at an id that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Id of the record holding the reference.
    pub from: String,
    /// The missing target id.
    pub to: String,
}

/// Result of `Catalog::validate`.
///
/// Validation never fails; findings are collected so the caller can decide
/// whether to warn or abort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub count_mismatches: Vec<CountMismatch>,
    /// Tools whose category is not a known category id.
    pub unknown_tool_categories: Vec<DanglingReference>,
    /// Changelog entries whose `tool_id` is not a known tool.
    pub unknown_changelog_tools: Vec<DanglingReference>,
    /// Articles whose category is not a known article category.
    pub unknown_article_categories: Vec<DanglingReference>,
    /// Ids that appear more than once, prefixed with their kind ("tool:cursor").
    pub duplicate_ids: Vec<String>,
    /// Tool ids whose URL would be refused by the browser opener, with the reason.
    pub invalid_urls: Vec<(String, String)>,
}

impl ValidationReport {
    pub fn is_consistent(&self) -> bool {
        self.count_mismatches.is_empty()
            && self.unknown_tool_categories.is_empty()
            && self.unknown_changelog_tools.is_empty()
            && self.unknown_article_categories.is_empty()
            && self.duplicate_ids.is_empty()
            && self.invalid_urls.is_empty()
    }

    /// One human-readable line per finding.
    pub fn findings(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for m in &self.count_mismatches {
            lines.push(format!(
                "category '{}' declares {} tools but {} reference it",
                m.category, m.stored, m.actual
            ));
        }
        for r in &self.unknown_tool_categories {
            lines.push(format!("tool '{}' uses unknown category '{}'", r.from, r.to));
        }
        for r in &self.unknown_changelog_tools {
            lines.push(format!(
                "changelog entry '{}' belongs to unknown tool '{}'",
                r.from, r.to
            ));
        }
        for r in &self.unknown_article_categories {
            lines.push(format!(
                "article '{}' uses unknown category '{}'",
                r.from, r.to
            ));
        }
        for id in &self.duplicate_ids {
            lines.push(format!("duplicate id {}", id));
        }
        for (tool, reason) in &self.invalid_urls {
            lines.push(format!("tool '{}' has an unusable URL: {}", tool, reason));
        }
        lines
    }
}
