use crate::catalog::{
    related_articles, Article, Bookmarks, Catalog, ChangelogEntry, DateGroup, Selection, Tool,
    ToolChangelogCount, ToolSort,
};
use crate::config::Config;
use crate::keybindings::KeybindingRegistry;
use crate::theme::{StyleMap, ThemeVariant};
use crate::util::MAX_SEARCH_QUERY_LENGTH;
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::time::{Duration, Instant};

/// Maximum scroll offset for the reader view (ratatui u16 limit).
pub const MAX_SCROLL: usize = u16::MAX as usize;

/// How many related articles the reader lists.
pub const RELATED_LIMIT: usize = 4;

/// How many recent changelog entries the tool detail pane shows.
pub const DETAIL_CHANGELOG_LIMIT: usize = 3;

const STATUS_TTL: Duration = Duration::from_secs(3);

// ============================================================================
// Page, View and Focus
// ============================================================================

/// Top-level listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Tools,
    Articles,
    Changelog,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Tools, Page::Articles, Page::Changelog];

    pub fn title(self) -> &'static str {
        match self {
            Self::Tools => "Tools",
            Self::Articles => "Articles",
            Self::Changelog => "Changelog",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Tools => Self::Articles,
            Self::Articles => Self::Changelog,
            Self::Changelog => Self::Tools,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Tools => Self::Changelog,
            Self::Articles => Self::Tools,
            Self::Changelog => Self::Articles,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Browse, // Sidebar + list
    Reader, // Full-screen article
}

/// Which panel has focus in Browse view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    List,
}

/// The article currently open in the reader.
#[derive(Debug, Clone)]
pub struct ReaderState<'a> {
    pub article: &'a Article,
    pub related: Vec<&'a Article>,
    pub related_cursor: usize,
}

// ============================================================================
// Application State
// ============================================================================

/// Transient view state over an immutable catalog.
///
/// Every list held here is a cached pipeline result. It is recomputed
/// synchronously whenever one of its inputs (selection, sort key, query)
/// changes, and the cursor follows the previously selected record by id when
/// that record survives the recomputation.
pub struct App<'a> {
    pub catalog: &'a Catalog,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    pub keybindings: KeybindingRegistry,

    pub page: Page,
    pub view: View,
    pub focus: Focus,
    pub needs_redraw: bool,
    pub show_help: bool,
    pub help_scroll_offset: usize,
    /// Featured strips above the tool and article lists (config `show_featured`).
    pub show_featured: bool,
    /// Status message with timestamp for auto-expiry.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    // Tools page
    pub tool_selection: Selection,
    pub tool_sort: ToolSort,
    /// Sidebar index: 0 is "All", then one per category.
    pub tool_category_index: usize,
    pub tools: Vec<&'a Tool>,
    pub selected_tool: usize,
    pub bookmarks: Bookmarks,

    // Articles page
    pub article_selection: Selection,
    pub article_category_index: usize,
    pub search_mode: bool,
    pub search_input: String,
    /// Query to restore when a search is cancelled.
    search_backup: Option<String>,
    pub articles: Vec<&'a Article>,
    pub selected_article: usize,

    // Changelog page
    /// Tool selector entries; computed once since the catalog never changes.
    pub changelog_tools: Vec<ToolChangelogCount<'a>>,
    pub changelog_selection: Selection,
    pub changelog_tool_index: usize,
    pub changelog: Vec<DateGroup<'a>>,
    /// Index into the flattened entries of `changelog`.
    pub selected_entry: usize,

    // Reader
    pub reader: Option<ReaderState<'a>>,
    pub scroll_offset: usize,
    /// Set by the reader renderer; used to clamp scrolling.
    pub reader_visible_lines: usize,
    pub reader_content_lines: usize,
}

impl<'a> App<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        let mut app = Self {
            catalog,
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            keybindings: KeybindingRegistry::new(),
            page: Page::Tools,
            view: View::Browse,
            focus: Focus::List,
            needs_redraw: true,
            show_help: false,
            help_scroll_offset: 0,
            show_featured: true,
            status_message: None,
            tool_selection: Selection::All,
            tool_sort: ToolSort::default(),
            tool_category_index: 0,
            tools: Vec::new(),
            selected_tool: 0,
            bookmarks: Bookmarks::default(),
            article_selection: Selection::All,
            article_category_index: 0,
            search_mode: false,
            search_input: String::new(),
            search_backup: None,
            articles: Vec::new(),
            selected_article: 0,
            changelog_tools: catalog.tools_with_changelogs(),
            changelog_selection: Selection::All,
            changelog_tool_index: 0,
            changelog: Vec::new(),
            selected_entry: 0,
            reader: None,
            scroll_offset: 0,
            reader_visible_lines: 0,
            reader_content_lines: 0,
        };
        app.refresh_tools();
        app.refresh_articles();
        app.refresh_changelog();
        app
    }

    /// Apply user configuration: theme, initial sort, featured strip and
    /// keybinding overrides. Returns keybinding warnings for display.
    pub fn configure(&mut self, config: &Config) -> Vec<String> {
        match ThemeVariant::from_str_name(&config.theme) {
            Some(variant) => self.set_theme(variant),
            None => tracing::warn!(theme = %config.theme, "Unknown theme in config, using dark"),
        }
        self.show_featured = config.show_featured;
        self.tool_sort = config.sort_key();
        self.refresh_tools();

        let warnings = self.keybindings.apply_overrides(&config.keybindings);
        for warning in &warnings {
            tracing::warn!(warning = %warning, "Keybinding override ignored");
        }
        warnings
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Dark → Light → Dark. Returns the new theme's name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Set status message (expires after 3 seconds).
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Returns true if a message was actually cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    // ========================================================================
    // Tools
    // ========================================================================

    pub fn selected_tool(&self) -> Option<&'a Tool> {
        self.tools.get(self.selected_tool).copied()
    }

    fn refresh_tools(&mut self) {
        let keep = self.selected_tool().map(|t| t.id.as_str());
        let catalog = self.catalog;
        self.tools = catalog.tool_view(&self.tool_selection, self.tool_sort);
        self.selected_tool = keep
            .and_then(|id| self.tools.iter().position(|t| t.id == id))
            .unwrap_or(0);
    }

    /// Select sidebar entry `index` (0 = all categories).
    pub fn select_tool_category(&mut self, index: usize) {
        let catalog = self.catalog;
        let index = index.min(catalog.categories.len());
        self.tool_category_index = index;
        self.tool_selection =
            sidebar_selection(index, catalog.categories.iter().map(|c| c.id.as_str()));
        self.refresh_tools();
    }

    /// Advance the sort key. Returns the new key's label.
    pub fn cycle_sort(&mut self) -> &'static str {
        self.tool_sort = self.tool_sort.next();
        self.refresh_tools();
        self.tool_sort.label()
    }

    /// Flip the bookmark on the selected tool.
    /// Returns the tool and whether it is now bookmarked.
    pub fn toggle_bookmark(&mut self) -> Option<(&'a Tool, bool)> {
        let tool = self.selected_tool()?;
        let now = self.bookmarks.toggle(&tool.id);
        Some((tool, now))
    }

    /// Up to `DETAIL_CHANGELOG_LIMIT` of the tool's newest changelog entries.
    pub fn recent_changes(&self, tool: &Tool) -> Vec<&'a ChangelogEntry> {
        let catalog = self.catalog;
        catalog
            .changelog_view(&Selection::Only(tool.id.clone()))
            .into_iter()
            .flat_map(|g| g.entries)
            .take(DETAIL_CHANGELOG_LIMIT)
            .collect()
    }

    // ========================================================================
    // Articles
    // ========================================================================

    pub fn selected_article(&self) -> Option<&'a Article> {
        self.articles.get(self.selected_article).copied()
    }

    fn refresh_articles(&mut self) {
        let keep = self.selected_article().map(|a| a.id.as_str());
        let catalog = self.catalog;
        self.articles = catalog.article_view(&self.article_selection, &self.search_input);
        self.selected_article = keep
            .and_then(|id| self.articles.iter().position(|a| a.id == id))
            .unwrap_or(0);
    }

    pub fn select_article_category(&mut self, index: usize) {
        let catalog = self.catalog;
        let index = index.min(catalog.article_categories.len());
        self.article_category_index = index;
        self.article_selection = sidebar_selection(
            index,
            catalog.article_categories.iter().map(|c| c.id.as_str()),
        );
        self.refresh_articles();
    }

    pub fn enter_search(&mut self) {
        self.page = Page::Articles;
        self.search_mode = true;
        self.search_backup = Some(self.search_input.clone());
    }

    /// Append to the query. Returns false when the query is at its length cap.
    pub fn push_search_char(&mut self, c: char) -> bool {
        if self.search_input.chars().count() >= MAX_SEARCH_QUERY_LENGTH {
            return false;
        }
        self.search_input.push(c);
        self.refresh_articles();
        true
    }

    pub fn pop_search_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.refresh_articles();
        }
    }

    /// Leave search mode keeping the query.
    pub fn commit_search(&mut self) {
        self.search_mode = false;
        self.search_backup = None;
    }

    /// Leave search mode restoring the query from before it was entered.
    pub fn cancel_search(&mut self) {
        self.search_mode = false;
        if let Some(previous) = self.search_backup.take() {
            self.search_input = previous;
            self.refresh_articles();
        }
    }

    // ========================================================================
    // Changelog
    // ========================================================================

    fn refresh_changelog(&mut self) {
        let keep = self.selected_changelog_entry().map(|e| e.id.as_str());
        let catalog = self.catalog;
        self.changelog = catalog.changelog_view(&self.changelog_selection);
        self.selected_entry = keep
            .and_then(|id| self.changelog_entries().position(|e| e.id == id))
            .unwrap_or(0);
    }

    /// Entries of the current changelog view in display order.
    pub fn changelog_entries(&self) -> impl Iterator<Item = &'a ChangelogEntry> + '_ {
        self.changelog.iter().flat_map(|g| g.entries.iter().copied())
    }

    pub fn changelog_entry_count(&self) -> usize {
        self.changelog.iter().map(|g| g.entries.len()).sum()
    }

    pub fn selected_changelog_entry(&self) -> Option<&'a ChangelogEntry> {
        self.changelog_entries().nth(self.selected_entry)
    }

    pub fn select_changelog_tool(&mut self, index: usize) {
        let index = index.min(self.changelog_tools.len());
        self.changelog_tool_index = index;
        self.changelog_selection = sidebar_selection(
            index,
            self.changelog_tools.iter().map(|t| t.tool.id.as_str()),
        );
        self.refresh_changelog();
    }

    /// Jump to the changelog page filtered to `tool`.
    /// Returns false when the tool has no entries.
    pub fn show_changelog_for(&mut self, tool: &Tool) -> bool {
        let Some(pos) = self.changelog_tools.iter().position(|t| t.tool.id == tool.id) else {
            return false;
        };
        self.select_changelog_tool(pos + 1);
        self.set_page(Page::Changelog);
        self.focus = Focus::List;
        true
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn set_page(&mut self, page: Page) {
        if self.search_mode && page != Page::Articles {
            self.commit_search();
        }
        self.page = page;
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::List,
            Focus::List => Focus::Sidebar,
        };
    }

    /// Number of sidebar entries on the current page, including "All".
    pub fn sidebar_len(&self) -> usize {
        1 + match self.page {
            Page::Tools => self.catalog.categories.len(),
            Page::Articles => self.catalog.article_categories.len(),
            Page::Changelog => self.changelog_tools.len(),
        }
    }

    pub fn sidebar_index(&self) -> usize {
        match self.page {
            Page::Tools => self.tool_category_index,
            Page::Articles => self.article_category_index,
            Page::Changelog => self.changelog_tool_index,
        }
    }

    pub fn list_len(&self) -> usize {
        match self.page {
            Page::Tools => self.tools.len(),
            Page::Articles => self.articles.len(),
            Page::Changelog => self.changelog_entry_count(),
        }
    }

    fn list_cursor(&mut self) -> &mut usize {
        match self.page {
            Page::Tools => &mut self.selected_tool,
            Page::Articles => &mut self.selected_article,
            Page::Changelog => &mut self.selected_entry,
        }
    }

    fn select_sidebar(&mut self, index: usize) {
        match self.page {
            Page::Tools => self.select_tool_category(index),
            Page::Articles => self.select_article_category(index),
            Page::Changelog => self.select_changelog_tool(index),
        }
    }

    /// Moving through the sidebar applies the selection immediately.
    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                let current = self.sidebar_index();
                if current > 0 {
                    self.select_sidebar(current - 1);
                }
            }
            Focus::List => {
                let cursor = self.list_cursor();
                *cursor = cursor.saturating_sub(1);
            }
        }
    }

    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                let current = self.sidebar_index();
                if current + 1 < self.sidebar_len() {
                    self.select_sidebar(current + 1);
                }
            }
            Focus::List => {
                let max_index = self.list_len().saturating_sub(1);
                let cursor = self.list_cursor();
                *cursor = cursor.saturating_add(1).min(max_index);
            }
        }
    }

    /// Reset the current page's filters to "All" (and clear the article query).
    pub fn clear_filters(&mut self) {
        match self.page {
            Page::Tools => self.select_tool_category(0),
            Page::Articles => {
                self.search_mode = false;
                self.search_backup = None;
                self.search_input.clear();
                self.select_article_category(0);
            }
            Page::Changelog => self.select_changelog_tool(0),
        }
    }

    /// Tool whose website the current selection points at.
    pub fn selected_tool_for_open(&self) -> Option<&'a Tool> {
        match self.page {
            Page::Tools => self.selected_tool(),
            Page::Changelog => {
                let entry = self.selected_changelog_entry()?;
                let catalog = self.catalog;
                catalog.find_tool(&entry.tool_id)
            }
            Page::Articles => None,
        }
    }

    // ========================================================================
    // Reader
    // ========================================================================

    pub fn open_article(&mut self, article: &'a Article) {
        let catalog = self.catalog;
        self.reader = Some(ReaderState {
            article,
            related: related_articles(&catalog.articles, article, RELATED_LIMIT),
            related_cursor: 0,
        });
        self.view = View::Reader;
        self.scroll_offset = 0;
        self.reader_content_lines = 0;
    }

    /// Open the article under the cursor. Returns false when the list is empty.
    pub fn enter_reader(&mut self) -> bool {
        match self.selected_article() {
            Some(article) => {
                self.open_article(article);
                true
            }
            None => false,
        }
    }

    pub fn cycle_related(&mut self) {
        if let Some(reader) = self.reader.as_mut() {
            if !reader.related.is_empty() {
                reader.related_cursor = (reader.related_cursor + 1) % reader.related.len();
            }
        }
    }

    /// Replace the reader's article with the highlighted related one.
    pub fn open_related(&mut self) -> bool {
        let next = self
            .reader
            .as_ref()
            .and_then(|r| r.related.get(r.related_cursor).copied());
        match next {
            Some(article) => {
                self.open_article(article);
                true
            }
            None => false,
        }
    }

    pub fn exit_reader(&mut self) {
        self.view = View::Browse;
        self.reader = None;
        self.scroll_offset = 0;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
        self.clamp_scroll();
    }

    /// Keep the scroll offset within the rendered content.
    pub fn clamp_scroll(&mut self) {
        let max_scroll = self
            .reader_content_lines
            .saturating_sub(self.reader_visible_lines);
        self.scroll_offset = self.scroll_offset.min(max_scroll).min(MAX_SCROLL);
    }
}

/// Sidebar index → selection: 0 is "All", `i` is the `i - 1`th id.
fn sidebar_selection<'s>(index: usize, mut ids: impl Iterator<Item = &'s str>) -> Selection {
    match index.checked_sub(1).and_then(|i| ids.nth(i)) {
        Some(id) => Selection::Only(id.to_owned()),
        None => Selection::All,
    }
}
