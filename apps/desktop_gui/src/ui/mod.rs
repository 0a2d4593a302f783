//! UI layer for the desktop table: app shell, toolbar, grid and pagination bar.

pub mod app;

pub use app::{CommentTableApp, StartupConfig};
