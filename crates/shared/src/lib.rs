//! Types shared by the table library and its front ends.

pub mod domain;
pub mod error;
pub mod view;
