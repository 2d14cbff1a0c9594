//! Keybinding registry: maps key events to actions, with config overrides.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// Everything a key can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    CycleFocus,
    Back,
    Select,
    ShowTools,
    ShowArticles,
    ShowChangelog,
    NextPage,
    PrevPage,
    CycleSort,
    ToggleBookmark,
    EnterSearch,
    ExitSearch,
    CommitSearch,
    ClearFilters,
    OpenInBrowser,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    ExitReader,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Description shown in the help overlay.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::NavDown => "Move down",
            Self::NavUp => "Move up",
            Self::CycleFocus => "Switch panel",
            Self::Back => "Go back / dismiss",
            Self::Select => "Open selection",
            Self::ShowTools => "Tools page",
            Self::ShowArticles => "Articles page",
            Self::ShowChangelog => "Changelog page",
            Self::NextPage => "Next page",
            Self::PrevPage => "Previous page",
            Self::CycleSort => "Cycle tool sort order",
            Self::ToggleBookmark => "Bookmark tool",
            Self::EnterSearch => "Search articles",
            Self::ExitSearch => "Cancel search",
            Self::CommitSearch => "Keep search",
            Self::ClearFilters => "Clear filters",
            Self::OpenInBrowser => "Open tool website",
            Self::ScrollDown => "Scroll down one line",
            Self::ScrollUp => "Scroll up one line",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::ExitReader => "Close article",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Which bindings are active. Lookups fall back to `Global`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Sidebar,
    List,
    Reader,
    Search,
}

impl Context {
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Sidebar => "Sidebar",
            Self::List => "List",
            Self::Reader => "Reader",
            Self::Search => "Search",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config.
///
/// Accepts single characters ("q", "/"), named keys ("Enter", "Esc", "Tab",
/// arrows, "Backspace", "Space"), "Ctrl+x" and "F1" through "F12".
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+").or_else(|| s.strip_prefix("ctrl+")) {
        let mut chars = rest.trim().chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeySpec::ctrl(c)),
            _ => None,
        };
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s
        .strip_prefix('F')
        .or_else(|| s.strip_prefix('f'))
        .and_then(|n| n.parse::<u8>().ok())
    {
        return (1..=12).contains(&n).then(|| KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::char(c)),
        _ => None,
    }
}

/// Display form of a key for the help overlay.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Context-aware key → action lookup.
///
/// The same key may mean different things in different contexts; a key not
/// bound in the active context falls back to its `Global` binding.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// Registration order, for the help overlay.
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn bind_all(&mut self, context: Context, keys: &[KeySpec], action: Action) {
        for &key in keys {
            self.bind(context, key, action);
        }
    }

    fn register_defaults(&mut self) {
        use Context::*;

        // === Global ===
        self.bind(Global, KeySpec::char('q'), Action::Quit);
        self.bind_all(
            Global,
            &[KeySpec::char('j'), KeySpec::plain(KeyCode::Down)],
            Action::NavDown,
        );
        self.bind_all(
            Global,
            &[KeySpec::char('k'), KeySpec::plain(KeyCode::Up)],
            Action::NavUp,
        );
        self.bind(Global, KeySpec::plain(KeyCode::Tab), Action::CycleFocus);
        self.bind(Global, KeySpec::plain(KeyCode::Esc), Action::Back);
        self.bind(Global, KeySpec::plain(KeyCode::Enter), Action::Select);

        // Pages
        self.bind(Global, KeySpec::char('1'), Action::ShowTools);
        self.bind(Global, KeySpec::char('2'), Action::ShowArticles);
        self.bind(Global, KeySpec::char('3'), Action::ShowChangelog);
        self.bind(Global, KeySpec::char(']'), Action::NextPage);
        self.bind(Global, KeySpec::char('['), Action::PrevPage);

        // Filters
        self.bind(Global, KeySpec::char('s'), Action::CycleSort);
        self.bind(Global, KeySpec::char('/'), Action::EnterSearch);
        self.bind(Global, KeySpec::char('x'), Action::ClearFilters);

        self.bind(Global, KeySpec::char('T'), Action::CycleTheme);
        self.bind(Global, KeySpec::char('?'), Action::ShowHelp);

        // === Sidebar ===
        self.bind_all(
            Sidebar,
            &[KeySpec::char('l'), KeySpec::plain(KeyCode::Right)],
            Action::CycleFocus,
        );

        // === List ===
        self.bind_all(
            List,
            &[KeySpec::char('h'), KeySpec::plain(KeyCode::Left)],
            Action::CycleFocus,
        );
        self.bind(List, KeySpec::char('b'), Action::ToggleBookmark);
        self.bind(List, KeySpec::char('o'), Action::OpenInBrowser);

        // === Reader ===
        self.bind(Reader, KeySpec::char('q'), Action::Quit);
        self.bind_all(
            Reader,
            &[KeySpec::char('b'), KeySpec::plain(KeyCode::Esc)],
            Action::ExitReader,
        );
        self.bind_all(
            Reader,
            &[KeySpec::char('j'), KeySpec::plain(KeyCode::Down)],
            Action::ScrollDown,
        );
        self.bind_all(
            Reader,
            &[KeySpec::char('k'), KeySpec::plain(KeyCode::Up)],
            Action::ScrollUp,
        );
        self.bind(Reader, KeySpec::ctrl('d'), Action::PageDown);
        self.bind(Reader, KeySpec::ctrl('u'), Action::PageUp);

        // === Search ===
        self.bind(Search, KeySpec::plain(KeyCode::Esc), Action::ExitSearch);
        self.bind(Search, KeySpec::plain(KeyCode::Enter), Action::CommitSearch);
    }

    /// Apply overrides from the config `[keybindings]` table.
    ///
    /// Keys are action names ("quit", "cycle_sort"), values are key strings
    /// ("Ctrl+q", "F5"). The new key replaces every existing binding of the
    /// action, in each context the action was bound in.
    ///
    /// Returns one warning per unknown action or unparseable key, and one per
    /// context where the new key took over another action's binding.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = Vec::new();
            for (ctx, _, a) in &self.bindings {
                if *a == action && !contexts.contains(ctx) {
                    contexts.push(*ctx);
                }
            }

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                if let Some(&displaced) = self.lookup.get(&(ctx, key)) {
                    self.bindings
                        .retain(|(c, k, a)| !(*c == ctx && *k == key && *a == displaced));
                    warnings.push(format!(
                        "Key '{}' moved from '{}' to '{}' in {:?} context",
                        key_str,
                        displaced.describe(),
                        action.describe(),
                        ctx
                    ));
                }
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Action for a key in `context`, falling back to `Global`.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);
        self.lookup.get(&(context, key)).copied().or_else(|| {
            (context != Context::Global)
                .then(|| self.lookup.get(&(Context::Global, key)).copied())
                .flatten()
        })
    }

    /// (context, key label, action, description) for every binding.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }

    /// Display label of the first key bound to `action`, for hints.
    pub fn key_label(&self, action: Action) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, _, a)| *a == action)
            .map(|(_, key, _)| format_key(key))
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_action_name(name: &str) -> Option<Action> {
    let action = match name.trim().to_lowercase().replace('-', "_").as_str() {
        "quit" => Action::Quit,
        "nav_down" | "down" => Action::NavDown,
        "nav_up" | "up" => Action::NavUp,
        "cycle_focus" | "focus" => Action::CycleFocus,
        "back" => Action::Back,
        "select" | "enter" => Action::Select,
        "show_tools" | "tools" => Action::ShowTools,
        "show_articles" | "articles" => Action::ShowArticles,
        "show_changelog" | "changelog" => Action::ShowChangelog,
        "next_page" => Action::NextPage,
        "prev_page" | "previous_page" => Action::PrevPage,
        "cycle_sort" | "sort" => Action::CycleSort,
        "toggle_bookmark" | "bookmark" => Action::ToggleBookmark,
        "enter_search" | "search" => Action::EnterSearch,
        "exit_search" => Action::ExitSearch,
        "commit_search" => Action::CommitSearch,
        "clear_filters" | "clear" => Action::ClearFilters,
        "open_in_browser" | "open" => Action::OpenInBrowser,
        "scroll_down" => Action::ScrollDown,
        "scroll_up" => Action::ScrollUp,
        "page_down" => Action::PageDown,
        "page_up" => Action::PageUp,
        "exit_reader" => Action::ExitReader,
        "cycle_theme" | "theme" => Action::CycleTheme,
        "show_help" | "help" => Action::ShowHelp,
        _ => return None,
    };
    Some(action)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(reg: &KeybindingRegistry, code: KeyCode, ctx: Context) -> Option<Action> {
        reg.action_for_key(code, KeyModifiers::NONE, ctx)
    }

    #[test]
    fn test_default_global_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, KeyCode::Char('q'), Context::Global), Some(Action::Quit));
        assert_eq!(key(&reg, KeyCode::Char('j'), Context::Global), Some(Action::NavDown));
        assert_eq!(key(&reg, KeyCode::Up, Context::Global), Some(Action::NavUp));
        assert_eq!(key(&reg, KeyCode::Char('s'), Context::Global), Some(Action::CycleSort));
        assert_eq!(key(&reg, KeyCode::Char('2'), Context::Global), Some(Action::ShowArticles));
        assert_eq!(key(&reg, KeyCode::Char(']'), Context::Global), Some(Action::NextPage));
    }

    #[test]
    fn test_list_context_falls_back_to_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, KeyCode::Char('b'), Context::List), Some(Action::ToggleBookmark));
        assert_eq!(key(&reg, KeyCode::Char('j'), Context::List), Some(Action::NavDown));
        // Bookmarking only makes sense on the list
        assert_eq!(key(&reg, KeyCode::Char('b'), Context::Sidebar), None);
    }

    #[test]
    fn test_reader_context_overrides_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, KeyCode::Char('j'), Context::Reader), Some(Action::ScrollDown));
        assert_eq!(key(&reg, KeyCode::Esc, Context::Reader), Some(Action::ExitReader));
        assert_eq!(key(&reg, KeyCode::Char('b'), Context::Reader), Some(Action::ExitReader));
        assert_eq!(
            reg.action_for_key(KeyCode::Char('d'), KeyModifiers::CONTROL, Context::Reader),
            Some(Action::PageDown)
        );
    }

    #[test]
    fn test_search_context() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, KeyCode::Esc, Context::Search), Some(Action::ExitSearch));
        assert_eq!(key(&reg, KeyCode::Enter, Context::Search), Some(Action::CommitSearch));
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let reg = KeybindingRegistry::new();
        assert_eq!(key(&reg, KeyCode::F(12), Context::Global), None);
    }

    #[test]
    fn test_apply_overrides_valid() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("quit".to_string(), "Ctrl+q".to_string())]);

        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());

        assert_eq!(key(&reg, KeyCode::Char('q'), Context::Global), None);
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, Context::Global),
            Some(Action::Quit)
        );
        // Reader had its own quit binding; it moves too
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, Context::Reader),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_override_replaces_every_key_for_action() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("nav-down".to_string(), "n".to_string())]);
        assert!(reg.apply_overrides(&overrides).is_empty());

        assert_eq!(key(&reg, KeyCode::Char('n'), Context::Global), Some(Action::NavDown));
        assert_eq!(key(&reg, KeyCode::Char('j'), Context::Global), None);
        assert_eq!(key(&reg, KeyCode::Down, Context::Global), None);
    }

    #[test]
    fn test_override_takes_key_from_other_action() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("quit".to_string(), "j".to_string())]);
        let warnings = reg.apply_overrides(&overrides);

        assert_eq!(key(&reg, KeyCode::Char('j'), Context::Global), Some(Action::Quit));
        let global_j: Vec<Action> = reg
            .all_bindings()
            .into_iter()
            .filter(|(ctx, label, _, _)| *ctx == Context::Global && label == "j")
            .map(|(_, _, action, _)| action)
            .collect();
        assert_eq!(global_j, vec![Action::Quit]);
        assert_eq!(reg.key_label(Action::NavDown).as_deref(), Some("Down"));

        // Global and Reader both lose their `j` binding
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .any(|w| w.contains(Action::NavDown.describe()) && w.contains("Global")));
        assert!(warnings
            .iter()
            .any(|w| w.contains(Action::ScrollDown.describe()) && w.contains("Reader")));
    }

    #[test]
    fn test_apply_overrides_warnings() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("refresh_all".to_string(), "r".to_string())]);
        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Unknown action"));

        let overrides = HashMap::from([("quit".to_string(), "Ctrl+Alt+Q".to_string())]);
        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Cannot parse key"));
    }

    #[test]
    fn test_parse_key_string() {
        assert_eq!(parse_key_string("Enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(parse_key_string("esc"), Some(KeySpec::plain(KeyCode::Esc)));
        assert_eq!(parse_key_string("space"), Some(KeySpec::char(' ')));
        assert_eq!(parse_key_string("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("Ctrl+d"), Some(KeySpec::ctrl('d')));
        assert_eq!(parse_key_string("/"), Some(KeySpec::char('/')));
        assert_eq!(parse_key_string("F"), Some(KeySpec::char('F')));
        assert_eq!(parse_key_string("é"), Some(KeySpec::char('é')));
        assert_eq!(parse_key_string("qq"), None);
    }

    #[test]
    fn test_format_key() {
        assert_eq!(format_key(&KeySpec::char('q')), "q");
        assert_eq!(format_key(&KeySpec::ctrl('d')), "Ctrl+d");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::Enter)), "Enter");
        assert_eq!(format_key(&KeySpec::char(' ')), "Space");
    }

    #[test]
    fn test_key_label_and_bindings() {
        let reg = KeybindingRegistry::new();
        assert_eq!(reg.key_label(Action::ShowHelp).as_deref(), Some("?"));
        assert_eq!(reg.key_label(Action::CycleSort).as_deref(), Some("s"));
        assert!(reg.all_bindings().len() >= 25);
    }
}
