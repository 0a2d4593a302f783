//! Comment table core: the one-shot collection fetch and the view-state
//! controller that filters, sorts, pages and edits the loaded rows.

pub mod config;
pub mod controller;
pub mod error;
pub mod pipeline;
pub mod source;

pub use config::{load_settings, Settings};
pub use controller::{LoadState, TableController};
pub use error::{FetchError, SettingsError};
pub use pipeline::derive_view;
pub use source::{
    load_comments, CommentSource, FetchOutcome, HttpCommentSource, StaticCommentSource,
    DEFAULT_ENDPOINT,
};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
