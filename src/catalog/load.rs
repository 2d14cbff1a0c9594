use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use super::types::{
    Article, ArticleCategory, Catalog, CatalogError, Category, ChangelogEntry, Tool,
};
use crate::util::strip_control_chars;

/// The catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

// ============================================================================
// On-disk Document
// ============================================================================

/// Shape of a catalog TOML document. Every top-level list is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogDocument {
    categories: Vec<CategoryDocument>,
    tools: Vec<Tool>,
    changelog: Vec<ChangelogEntry>,
    articles: Vec<Article>,
    article_categories: Vec<ArticleCategory>,
}

/// Category as written in a file: `count` may be left out.
#[derive(Debug, Deserialize)]
struct CategoryDocument {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    count: Option<usize>,
}

// ============================================================================
// Loading
// ============================================================================

impl Catalog {
    /// Maximum catalog file size (4 MB).
    const MAX_FILE_SIZE: u64 = 4 * 1_048_576;

    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog file, replacing the built-in data.
    ///
    /// - Missing or unreadable file → `Err(CatalogError::Io)`
    /// - Larger than 4 MB → `Err(CatalogError::TooLarge)`
    /// - Invalid TOML, bad date, unknown pricing tier → `Err(CatalogError::Parse)`
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(CatalogError::TooLarge(format!(
                "Catalog file is {} bytes (max {} bytes)",
                meta.len(),
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            tools = catalog.tools.len(),
            articles = catalog.articles.len(),
            changelog = catalog.changelog.len(),
            "Loaded catalog file"
        );
        Ok(catalog)
    }

    /// Parse and normalize a catalog document.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = toml::from_str(content)?;
        Ok(Self::from_document(doc))
    }

    /// Normalize a parsed document:
    /// - strip terminal control characters from displayed text
    /// - merge tool-embedded changelog entries into the feed
    /// - compute missing category counts
    fn from_document(doc: CatalogDocument) -> Self {
        let mut tool_counts: HashMap<&str, usize> = HashMap::new();
        for tool in &doc.tools {
            *tool_counts.entry(tool.category.as_str()).or_default() += 1;
        }

        let categories: Vec<Category> = doc
            .categories
            .iter()
            .map(|c| Category {
                id: c.id.clone(),
                name: clean(&c.name),
                description: clean(&c.description),
                icon: clean(&c.icon),
                count: c
                    .count
                    .unwrap_or_else(|| tool_counts.get(c.id.as_str()).copied().unwrap_or(0)),
            })
            .collect();

        let tools: Vec<Tool> = doc.tools.into_iter().map(clean_tool).collect();

        let mut changelog: Vec<ChangelogEntry> =
            doc.changelog.into_iter().map(clean_entry).collect();
        let mut seen: HashSet<String> = changelog.iter().map(|e| e.id.clone()).collect();
        for tool in &tools {
            for entry in &tool.changelog {
                if !seen.insert(entry.id.clone()) {
                    tracing::debug!(
                        tool = %tool.id,
                        entry = %entry.id,
                        "Embedded changelog entry already in feed, skipping"
                    );
                    continue;
                }
                changelog.push(entry.clone());
            }
        }

        let articles = doc.articles.into_iter().map(clean_article).collect();
        let article_categories = doc
            .article_categories
            .into_iter()
            .map(|c| ArticleCategory {
                name: clean(&c.name),
                description: clean(&c.description),
                ..c
            })
            .collect();

        Self {
            categories,
            tools,
            changelog,
            articles,
            article_categories,
        }
    }
}

/// Strip control characters, reusing the original allocation when clean.
fn clean_owned(s: String) -> String {
    match strip_control_chars(&s) {
        Cow::Borrowed(_) => s,
        Cow::Owned(stripped) => stripped,
    }
}

fn clean(s: &str) -> String {
    strip_control_chars(s).into_owned()
}

fn clean_entry(entry: ChangelogEntry) -> ChangelogEntry {
    ChangelogEntry {
        version: clean_owned(entry.version),
        title: clean_owned(entry.title),
        description: clean_owned(entry.description),
        ..entry
    }
}

fn clean_tool(tool: Tool) -> Tool {
    let owner = tool.id.clone();
    Tool {
        name: clean_owned(tool.name),
        description: clean_owned(tool.description),
        tags: tool.tags.into_iter().map(clean_owned).collect(),
        features: tool.features.into_iter().map(clean_owned).collect(),
        changelog: tool
            .changelog
            .into_iter()
            .map(|e| ChangelogEntry {
                tool_id: owner.clone(),
                ..clean_entry(e)
            })
            .collect(),
        ..tool
    }
}

fn clean_article(article: Article) -> Article {
    Article {
        title: clean_owned(article.title),
        description: clean_owned(article.description),
        content: clean_owned(article.content),
        author: clean_owned(article.author),
        read_time: clean_owned(article.read_time),
        tags: article.tags.into_iter().map(clean_owned).collect(),
        ..article
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL_TOOL: &str = r#"
[[tools]]
id = "alpha"
name = "Alpha"
description = "First tool"
category = "misc"
url = "https://alpha.example.com"
pricing = "free"
rating = 4.0
last_updated = "2024-03-01"
"#;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.tools.len(), 10);
        assert_eq!(catalog.categories.len(), 6);
        assert_eq!(catalog.articles.len(), 7);
        assert_eq!(catalog.article_categories.len(), 5);
        // 7 feed entries plus one embedded in tabnine
        assert_eq!(catalog.changelog.len(), 8);
    }

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = Catalog::builtin().unwrap();
        let report = catalog.validate();
        assert!(report.is_consistent(), "{:?}", report.findings());
    }

    #[test]
    fn test_empty_document() {
        let catalog = Catalog::from_toml_str("").unwrap();
        assert!(catalog.tools.is_empty());
        assert!(catalog.changelog.is_empty());
    }

    #[test]
    fn test_minimal_tool_defaults() {
        let catalog = Catalog::from_toml_str(MINIMAL_TOOL).unwrap();
        let tool = &catalog.tools[0];
        assert!(tool.tags.is_empty());
        assert!(tool.features.is_empty());
        assert!(tool.changelog.is_empty());
        assert!(!tool.featured);
        assert_eq!(tool.last_updated.to_string(), "2024-03-01");
    }

    #[test]
    fn test_missing_count_is_computed() {
        let content = format!(
            "{}\n[[categories]]\nid = \"misc\"\nname = \"Misc\"\n\n[[categories]]\nid = \"empty\"\nname = \"Empty\"\ncount = 7\n",
            MINIMAL_TOOL
        );
        let catalog = Catalog::from_toml_str(&content).unwrap();
        assert_eq!(catalog.categories[0].count, 1);
        // Declared counts are kept as written
        assert_eq!(catalog.categories[1].count, 7);
    }

    #[test]
    fn test_malformed_date_rejected() {
        let content = MINIMAL_TOOL.replace("2024-03-01", "March 1st");
        let err = Catalog::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_unknown_pricing_rejected() {
        let content = MINIMAL_TOOL.replace("\"free\"", "\"enterprise\"");
        let err = Catalog::from_toml_str(&content).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.to_string().contains("Invalid catalog file"));
    }

    #[test]
    fn test_embedded_changelog_owner_is_forced() {
        let content = format!(
            "{}\n[[tools.changelog]]\nid = \"alpha-1\"\nversion = \"1.0\"\ndate = \"2024-03-02\"\ntitle = \"Launch\"\ndescription = \"\"\ntype = \"feature\"\ntool_id = \"someone-else\"\n",
            MINIMAL_TOOL
        );
        let catalog = Catalog::from_toml_str(&content).unwrap();
        assert_eq!(catalog.changelog.len(), 1);
        assert_eq!(catalog.changelog[0].tool_id, "alpha");
        assert_eq!(catalog.tools[0].changelog[0].tool_id, "alpha");
    }

    #[test]
    fn test_embedded_duplicate_of_feed_entry_skipped() {
        let content = format!(
            "[[changelog]]\nid = \"dup\"\nversion = \"1.0\"\ndate = \"2024-03-02\"\ntitle = \"Feed copy\"\ndescription = \"\"\ntype = \"feature\"\ntool_id = \"alpha\"\n{}\n[[tools.changelog]]\nid = \"dup\"\nversion = \"1.0\"\ndate = \"2024-03-02\"\ntitle = \"Embedded copy\"\ndescription = \"\"\ntype = \"feature\"\n",
            MINIMAL_TOOL
        );
        let catalog = Catalog::from_toml_str(&content).unwrap();
        assert_eq!(catalog.changelog.len(), 1);
        assert_eq!(catalog.changelog[0].title, "Feed copy");
    }

    #[test]
    fn test_control_chars_stripped() {
        let content = MINIMAL_TOOL.replace("First tool", "First \\u001b[31mtool");
        let catalog = Catalog::from_toml_str(&content).unwrap();
        assert_eq!(catalog.tools[0].description, "First tool");
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("/tmp/toolshelf_test_nonexistent_catalog.toml");
        let err = Catalog::load(path).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_load_file() {
        let dir = std::env::temp_dir().join("toolshelf_catalog_test_load");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.toml");
        std::fs::write(&path, MINIMAL_TOOL).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.tools.len(), 1);
        assert_eq!(catalog.tools[0].id, "alpha");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("toolshelf_catalog_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.toml");
        std::fs::write(&path, "#".repeat(4 * 1_048_576 + 1)).unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
