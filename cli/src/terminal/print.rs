use std::path::PathBuf;

use colored::*;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str) {
    println!("{}", header_line(msg));
}

/// Centers `⟦ MSG ⟧` in a rule of [`TOTAL_WIDTH`] display columns.
fn header_line(msg: &str) -> ColoredString {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = UnicodeWidthStr::width(formatted.as_str());

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black()
}

pub fn path_list(paths: &[PathBuf]) {
    if paths.is_empty() {
        println!("  {}", "<empty>".dimmed());
        return;
    }

    for (i, path) in paths.iter().enumerate() {
        let branch: ColoredString = if i + 1 != paths.len() {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        println!(" {} {}", branch, path.display());
    }
}

/// Writes `value` as pretty JSON to stdout, uncolored so it can be piped.
pub fn json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
