//! Bridge between the UI thread and the backend worker that performs the fetch.

pub mod commands;
pub mod runtime;
