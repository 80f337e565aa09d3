//! Shared building blocks for the student registry crates.

pub mod types;
pub mod utils;
