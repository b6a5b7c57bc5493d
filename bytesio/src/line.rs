//! Newline scanning over the stream contents.

use std::ops::Range;

/// Finds the next line in `data` starting at `position`.
///
/// `data` is the logical contents (`[0, length)`). The returned range
/// includes the trailing `\n` when there is one and is cut to at most
/// `limit` bytes. The caller moves its cursor to `range.end`.
///
/// An empty range means end of stream, including when `position` is past
/// the end of `data`.
pub(crate) fn next_line(data: &[u8], position: usize, limit: Option<usize>) -> Range<usize> {
    if position >= data.len() {
        return position..position;
    }

    let rest = &data[position..];
    let mut n = match rest.iter().position(|&b| b == b'\n') {
        Some(i) => i + 1,
        None => rest.len(),
    };
    if let Some(limit) = limit {
        n = n.min(limit);
    }
    position..position + n
}
