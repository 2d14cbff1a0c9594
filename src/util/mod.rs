//! Helpers shared by the catalog loader, the TUI and the print mode.
//!
//! - **Text**: terminal-width aware measuring and truncation, plus stripping
//!   of control sequences from catalog text before it reaches the terminal
//! - **URLs**: checks applied before a tool link is handed to the browser
//!
//! # Examples
//!
//! ```
//! use toolshelf::util::{display_width, truncate_to_width, validate_url_for_open};
//!
//! assert_eq!(display_width("Cursor"), 6);
//! assert_eq!(truncate_to_width("GitHub Copilot", 9), "GitHub...");
//! assert!(validate_url_for_open("https://cursor.sh").is_ok());
//! ```

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};

/// Longest article search query accepted from the search bar or `--query`.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
