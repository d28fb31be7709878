//! Aligned, terminal-width-aware listing of registry entries.
//!
//! Each entry renders as `"{name} ({project_link})"`, padded to the name
//! column, then `" - "` and the description. Descriptions are wrapped to the
//! remaining width and continuation lines are indented under the description
//! column. All widths are terminal columns, so wide characters count twice.

use unicode_width::UnicodeWidthStr;

use crate::terminal;

// Padding added after the widest label when the name column is computed
const NAME_COLUMN_PADDING: usize = 4;
// Columns reserved around the " - " separator
const SEPARATOR_RESERVE: usize = 5;
// Below this the description is left unwrapped
const MIN_WRAP_WIDTH: usize = 10;

/// Anything that can be shown as one row of the listing.
pub trait ListingEntry {
    fn name(&self) -> &str;
    fn project_link(&self) -> &str;
    fn desc(&self) -> &str;

    fn label(&self) -> String {
        format!("{} ({})", self.name(), self.project_link())
    }
}

/// Number of terminal columns `s` occupies.
#[must_use]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Render `hits` as an aligned listing.
///
/// `name_column_width` defaults to the widest label plus four columns and
/// `terminal_width` defaults to the width of the current terminal. Labels
/// wider than the name column are not truncated; they overflow it.
#[must_use]
pub fn format_package_results<T: ListingEntry>(
    hits: &[T],
    name_column_width: Option<usize>,
    terminal_width: Option<usize>,
) -> String {
    if hits.is_empty() {
        return String::new();
    }

    let name_column_width = name_column_width.unwrap_or_else(|| {
        hits.iter()
            .map(|hit| display_width(&hit.label()))
            .max()
            .unwrap_or(0)
            + NAME_COLUMN_PADDING
    });
    let terminal_width = terminal_width.unwrap_or_else(terminal::terminal_width);

    let target_width = terminal_width
        .checked_sub(name_column_width + SEPARATOR_RESERVE)
        .filter(|width| *width > MIN_WRAP_WIDTH);
    let separator = format!("\n{}", " ".repeat(name_column_width + 3));

    let lines: Vec<String> = hits
        .iter()
        .map(|hit| {
            let name = hit.label();
            let summary = match target_width {
                Some(width) => wrap_summary(hit.desc(), width).join(&separator),
                None => hit.desc().to_string(),
            };
            let padding = " ".repeat(name_column_width.saturating_sub(display_width(&name)));
            format!("{name}{padding} - {summary}")
        })
        .collect();

    lines.join("\n")
}

/// Greedily split `summary` into lines no wider than `target_width` columns.
///
/// The last element is whatever remains, possibly empty. Text containing
/// control characters (such as `\n`) has no measurable width and is left
/// unwrapped.
#[must_use]
pub fn wrap_summary(summary: &str, target_width: usize) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = summary;

    while measured_width(rest).is_some_and(|width| width > target_width) {
        let mut length = target_width.max(1);
        while length > 1 && display_width(char_prefix(rest, length)) > target_width {
            length -= 1;
        }
        let line = char_prefix(rest, length);
        lines.push(line);
        rest = &rest[line.len()..];
    }
    lines.push(rest);

    lines
}

// Display width, or None when a control character makes it unknowable
fn measured_width(s: &str) -> Option<usize> {
    if s.chars().any(char::is_control) {
        None
    } else {
        Some(display_width(s))
    }
}

// First `count` characters of `s`, or all of it if shorter
fn char_prefix(s: &str, count: usize) -> &str {
    match s.char_indices().nth(count) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}
