//! Output formatting for CLI results.

pub mod json;

pub use json::write_json;
