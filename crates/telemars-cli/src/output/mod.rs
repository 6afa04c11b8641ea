//! Output formatting utilities for the tm CLI.
//!
//! - [`audience`] - audience filters (label, parse)
//! - [`table`] - task result tables (run)
//! - [`helpers`] - common formatting utilities

mod audience;
pub mod helpers;
mod table;

pub use audience::{format_audience_json, format_audience_table};
pub use table::{format_result_json, format_result_table};
