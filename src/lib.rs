//! toolshelf: a terminal catalog of AI developer tools, their changelogs and
//! best-practice articles.
//!
//! The [`catalog`] module holds the data model and the pure view pipelines;
//! [`app`] and [`ui`] build the interactive browser on top of them.

pub mod app;
pub mod catalog;
pub mod config;
pub mod keybindings;
pub mod listing;
pub mod theme;
pub mod ui;
pub mod util;
