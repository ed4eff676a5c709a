//! Utility functions and helpers
//!
//! Clock, atomic file writes, pagination and payload truncation.

pub mod atomic;
pub mod time;

pub use time::{current_timestamp, iso8601, Clock, ManualClock, SystemClock};

/// Skip `offset` items, then keep at most `limit`.
/// An offset past the end yields an empty page.
pub fn paginate<T>(items: Vec<T>, offset: Option<usize>, limit: Option<usize>) -> Vec<T> {
    let iter = items.into_iter().skip(offset.unwrap_or(0));
    match limit {
        Some(limit) => iter.take(limit).collect(),
        None => iter.collect(),
    }
}

/// Keep the first `budget` characters of `text`
pub fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
