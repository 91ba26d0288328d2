//! Report formatting utilities for terminal output

/// Wrap text in bright green for terminal display
pub fn highlight(text: &str) -> String {
    format!("\x1b[92m{}\x1b[0m", text)
}

/// Format a section header line, e.g. `--- Expense Tracker Menu ---`
pub fn section_header(title: &str) -> String {
    format!("--- {} ---", title)
}
