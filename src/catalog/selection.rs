use std::fmt;

/// Sentinel accepted wherever a selection is parsed from text.
pub const ALL_SENTINEL: &str = "all";

/// Which records a listing shows: everything, or those owned by one id.
///
/// Used for the tool category, the article category and the changelog tool
/// selector alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Parse user input. `"all"` (any case) and blank input mean `All`;
    /// anything else is taken as an id verbatim (after trimming).
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL_SENTINEL) {
            Self::All
        } else {
            Self::Only(s.to_owned())
        }
    }

    /// Build from an optional id, treating `None` as `All`.
    pub fn from_option(id: Option<&str>) -> Self {
        id.map(Self::parse).unwrap_or_default()
    }

    /// Exact, case-sensitive match against a record's owning id.
    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == id,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(id) => Some(id),
        }
    }
}

impl From<&str> for Selection {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_SENTINEL),
            Self::Only(id) => f.write_str(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel_any_case() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(Selection::parse("ALL"), Selection::All);
        assert_eq!(Selection::parse("  All "), Selection::All);
    }

    #[test]
    fn test_blank_is_all() {
        assert_eq!(Selection::parse(""), Selection::All);
        assert_eq!(Selection::parse("   "), Selection::All);
        assert_eq!(Selection::from_option(None), Selection::All);
    }

    #[test]
    fn test_id_kept_verbatim() {
        assert_eq!(
            Selection::parse("code-completion"),
            Selection::Only("code-completion".to_string())
        );
        assert_eq!(
            Selection::from_option(Some("cursor")),
            Selection::Only("cursor".to_string())
        );
    }

    #[test]
    fn test_matches_is_exact() {
        let sel = Selection::parse("cursor");
        assert!(sel.matches("cursor"));
        assert!(!sel.matches("Cursor"));
        assert!(!sel.matches("cursor-pro"));
        assert!(Selection::All.matches("anything"));
    }

    #[test]
    fn test_display_roundtrips_sentinel() {
        assert_eq!(Selection::All.to_string(), "all");
        assert_eq!(Selection::parse("tabnine").to_string(), "tabnine");
    }
}
