//! Screen state machines.
//!
//! Each screen owns its data and its pickers, turns key actions into intents
//! and merges refresh results. Screens never schedule work themselves; the
//! controller translates their intents into requests.

pub mod home;
pub mod message;

pub use home::{HomeIntent, HomeScreen, Pane};
pub use message::{MessageIntent, MessageScreen};

/// Pads `text` with spaces to `width` columns.
pub(crate) fn pad_to(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}

/// Joins two blocks of text column-wise.
pub(crate) fn side_by_side(left: &str, left_width: usize, gap: usize, right: &str) -> String {
    let left: Vec<&str> = left.lines().collect();
    let right: Vec<&str> = right.lines().collect();
    let rows = left.len().max(right.len());

    (0..rows)
        .map(|row| {
            let l = left.get(row).copied().unwrap_or("");
            let r = right.get(row).copied().unwrap_or("");
            if r.is_empty() {
                l.trim_end().to_string()
            } else {
                format!("{}{}{r}", pad_to(l, left_width), " ".repeat(gap))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
