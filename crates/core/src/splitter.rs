//! Windowed splitting of source text into fill-in-the-middle examples.
//!
//! A document is partitioned into contiguous line windows bounded by a
//! character budget, and each window is carved into three non-empty
//! segments (prefix, middle, suffix) at uniformly random line boundaries.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_MAX_CHARS;

/// One fill-in-the-middle training example derived from a single window.
///
/// `prefix + middle + suffix` reconstructs the window's lines in order;
/// each segment carries exactly one trailing newline and is non-empty
/// after trimming whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub fname: String,
    pub prefix: String,
    pub middle: String,
    pub suffix: String,
}

/// Configuration for the window splitter.
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// Character budget per window: the sum of line lengths plus one
    /// separator character per line.
    pub max_chars: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// Partition `code` into contiguous line windows bounded by `max_chars`.
///
/// A window closes when appending the next line would push its running
/// length (each line's length plus one separator) past the budget, or at
/// end of document. Concatenated in order, the windows reproduce the
/// document's lines exactly. A single line longer than the budget forms
/// a window of its own rather than being truncated.
pub fn line_windows(code: &str, max_chars: usize) -> Vec<Vec<&str>> {
    let mut windows = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for line in code.lines() {
        let cost = line.len() + 1;
        if !current.is_empty() && current_len + cost > max_chars {
            windows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push(line);
        current_len += cost;
    }

    // Trailing partial window that never reached the budget.
    if !current.is_empty() {
        windows.push(current);
    }

    windows
}

/// Split `code` into zero or more fill-in-the-middle examples.
///
/// Each window yields at most one example; windows too short to produce
/// three non-empty segments, and splits that degenerate to a
/// whitespace-only segment, contribute nothing. This is normal control
/// flow, not an error.
pub fn split<R: Rng>(
    code: &str,
    fname: &str,
    config: &SplitterConfig,
    rng: &mut R,
) -> Vec<Example> {
    line_windows(code, config.max_chars)
        .iter()
        .filter_map(|window| split_window(window, fname, rng))
        .collect()
}

/// Attempt a 3-way split of one window at random line boundaries.
///
/// `prefix_end` is drawn from `[1, n-1]` and `suffix_start` from
/// `[prefix_end, n]`, so the segments never overlap and cover the window
/// in order. `suffix_start == prefix_end` leaves the middle empty and is
/// filtered out below, as is any segment that trims to nothing.
fn split_window<R: Rng>(lines: &[&str], fname: &str, rng: &mut R) -> Option<Example> {
    if lines.len() < 2 {
        return None;
    }

    let prefix_end = rng.gen_range(1..lines.len());
    let suffix_start = rng.gen_range(prefix_end..=lines.len());

    let prefix = join_lines(&lines[..prefix_end]);
    let middle = join_lines(&lines[prefix_end..suffix_start]);
    let suffix = join_lines(&lines[suffix_start..]);

    if prefix.trim().is_empty() || middle.trim().is_empty() || suffix.trim().is_empty() {
        return None;
    }

    Some(Example {
        fname: fname.to_string(),
        prefix,
        middle,
        suffix,
    })
}

/// Join lines with `\n` and terminate with exactly one trailing `\n`.
fn join_lines(lines: &[&str]) -> String {
    let mut joined = lines.join("\n");
    joined.push('\n');
    joined
}
