//! Terminal User Interface module.
//!
//! This module provides the interactive catalog browser, including:
//! - Main event loop (`run`)
//! - Input handling for browse, reader, and search modes
//! - Rendering for the tool, article and changelog pages plus the reader
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `render` - Layout and view dispatch
//! - `sidebar` - Category / tool selector panel
//! - `tools` - Tool list, featured strip and detail pane
//! - `articles` - Article list and search bar
//! - `changelog` - Date-grouped changelog list
//! - `reader` - Markdown article reader
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod articles;
mod changelog;
mod help;
mod input;
mod loop_runner;
pub mod reader;
mod render;
mod sidebar;
mod status;
mod tools;

pub use loop_runner::{run, Action};
