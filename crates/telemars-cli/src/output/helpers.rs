//! Common helper functions for output formatting.

use owo_colors::OwoColorize;
use serde_json::Value;

/// Truncates a string to at most `max_len` characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Renders a result cell: strings unquoted, null as empty.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Formats a header line, dimmed when colors are on.
pub fn format_header(header: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", header.dimmed())
    } else {
        format!("{header}\n")
    }
}

/// Formats a field name for key/value listings.
pub fn format_key(key: &str, use_colors: bool) -> String {
    let padded = format!("{key:<15}");
    if use_colors {
        padded.bold().to_string()
    } else {
        padded
    }
}
