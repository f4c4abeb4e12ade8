//! Orderings of path lists.

use alloc::collections::BinaryHeap;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Reverse;

use crate::anchor::SortMode;

/// Sorts strings by their number of characters, using a binary heap.
///
/// Strings of the same length are ordered lexicographically in both
/// directions.
///
/// # Examples
///
/// ```
/// use pathtree::sort_length_order;
///
/// let sorted = sort_length_order(
///     ["hi", "nice to meet you", "how are you?", "merci beaucoup"],
///     true,
/// );
/// assert_eq!(
///     sorted,
///     ["hi", "how are you?", "merci beaucoup", "nice to meet you"]
/// );
/// ```
#[must_use]
pub fn sort_length_order<I, S>(items: I, ascending: bool) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let items = items.into_iter().map(Into::into);
    if ascending {
        // Min-heap on `(len, s)`.
        let mut heap: BinaryHeap<Reverse<(usize, String)>> = items
            .map(|s: String| Reverse((s.chars().count(), s)))
            .collect();
        let mut sorted = Vec::with_capacity(heap.len());
        while let Some(Reverse((_, s))) = heap.pop() {
            sorted.push(s);
        }
        sorted
    } else {
        // Min-heap on `(-len, s)`: the longest first, ties ascending.
        let mut heap: BinaryHeap<(usize, Reverse<String>)> = items
            .map(|s: String| (s.chars().count(), Reverse(s)))
            .collect();
        let mut sorted = Vec::with_capacity(heap.len());
        while let Some((_, Reverse(s))) = heap.pop() {
            sorted.push(s);
        }
        sorted
    }
}

/// Sorts leaf paths in place.
pub(crate) fn sort_paths(paths: &mut Vec<String>, mode: SortMode, ascending: bool) {
    match mode {
        SortMode::Alphabetical => {
            paths.sort_unstable();
            if !ascending {
                paths.reverse();
            }
        }
        SortMode::Length => {
            let taken = core::mem::take(paths);
            *paths = sort_length_order(taken, ascending);
        }
    }
}
