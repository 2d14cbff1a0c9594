//! Theme system for the TUI.
//!
//! Semantic color roles map to ratatui `Style` values. `ThemeVariant` picks
//! the Dark or Light palette and `StyleMap` resolves role names to styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role and its `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Lists (tools, articles, changelog) --
    pub item_normal: Style,
    pub item_selected: Style,
    pub item_title: Style,
    pub item_meta: Style,
    pub rating_stars: Style,
    pub featured_marker: Style,
    pub bookmark_marker: Style,
    pub empty_state: Style,

    // -- Sidebar --
    pub sidebar_active: Style,
    pub sidebar_count: Style,

    // -- Changelog --
    pub date_header: Style,
    pub kind_feature: Style,
    pub kind_improvement: Style,
    pub kind_bugfix: Style,
    pub kind_breaking: Style,

    // -- Reader --
    pub reader_heading: Style,
    pub reader_body: Style,
    pub reader_metadata: Style,
    pub reader_code_block: Style,
    pub reader_inline_code: Style,
    pub reader_emphasis: Style,
    pub reader_strong: Style,
    pub reader_link: Style,

    // -- Chrome --
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub search_bar: Style,
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            item_normal: Style::default(),
            item_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            item_title: Style::default().add_modifier(Modifier::BOLD),
            item_meta: Style::default().fg(Color::Gray),
            rating_stars: Style::default().fg(Color::Yellow),
            featured_marker: Style::default().fg(Color::Magenta),
            bookmark_marker: Style::default().fg(Color::Cyan),
            empty_state: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            sidebar_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            sidebar_count: Style::default().fg(Color::DarkGray),

            date_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            kind_feature: Style::default().fg(Color::Green),
            kind_improvement: Style::default().fg(Color::Blue),
            kind_bugfix: Style::default().fg(Color::Yellow),
            kind_breaking: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),

            reader_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            reader_body: Style::default(),
            reader_metadata: Style::default().fg(Color::DarkGray),
            reader_code_block: Style::default().fg(Color::Yellow).bg(Color::Black),
            reader_inline_code: Style::default().fg(Color::Yellow),
            reader_emphasis: Style::default().add_modifier(Modifier::ITALIC),
            reader_strong: Style::default().add_modifier(Modifier::BOLD),
            reader_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            tab_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            search_bar: Style::default().fg(Color::Yellow),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    /// Tuned for light terminal backgrounds.
    fn light() -> Self {
        Self {
            item_normal: Style::default().fg(Color::Black),
            item_selected: Style::default().bg(Color::Blue).fg(Color::White),
            item_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            item_meta: Style::default().fg(Color::DarkGray),
            rating_stars: Style::default().fg(Color::Magenta),
            featured_marker: Style::default().fg(Color::Red),
            bookmark_marker: Style::default().fg(Color::Blue),
            empty_state: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            sidebar_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            sidebar_count: Style::default().fg(Color::DarkGray),

            date_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            kind_feature: Style::default().fg(Color::Green),
            kind_improvement: Style::default().fg(Color::Blue),
            kind_bugfix: Style::default().fg(Color::Magenta),
            kind_breaking: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),

            reader_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            reader_body: Style::default().fg(Color::Black),
            reader_metadata: Style::default().fg(Color::DarkGray),
            reader_code_block: Style::default().fg(Color::DarkGray).bg(Color::White),
            reader_inline_code: Style::default().fg(Color::DarkGray),
            reader_emphasis: Style::default().add_modifier(Modifier::ITALIC),
            reader_strong: Style::default().add_modifier(Modifier::BOLD),
            reader_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            tab_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            search_bar: Style::default().fg(Color::Magenta),
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// Role-name keyed style lookup used by the renderers.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 30] = [
    "item_normal",
    "item_selected",
    "item_title",
    "item_meta",
    "rating_stars",
    "featured_marker",
    "bookmark_marker",
    "empty_state",
    "sidebar_active",
    "sidebar_count",
    "date_header",
    "kind_feature",
    "kind_improvement",
    "kind_bugfix",
    "kind_breaking",
    "reader_heading",
    "reader_body",
    "reader_metadata",
    "reader_code_block",
    "reader_inline_code",
    "reader_emphasis",
    "reader_strong",
    "reader_link",
    "tab_active",
    "tab_inactive",
    "search_bar",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    // Alias: panel titles share the focused border color
    "panel_title",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 30] = [
            p.item_normal,
            p.item_selected,
            p.item_title,
            p.item_meta,
            p.rating_stars,
            p.featured_marker,
            p.bookmark_marker,
            p.empty_state,
            p.sidebar_active,
            p.sidebar_count,
            p.date_header,
            p.kind_feature,
            p.kind_improvement,
            p.kind_bugfix,
            p.kind_breaking,
            p.reader_heading,
            p.reader_body,
            p.reader_metadata,
            p.reader_code_block,
            p.reader_inline_code,
            p.reader_emphasis,
            p.reader_strong,
            p.reader_link,
            p.tab_active,
            p.tab_inactive,
            p.search_bar,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.panel_border_focused.add_modifier(Modifier::BOLD),
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Style for `role`, or `Style::default()` when the role is unknown.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::from_palette(&ThemeVariant::default().palette())
    }
}

// ============================================================================
// Tests
// ============================================================================
