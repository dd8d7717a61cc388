//! Stable top-down merge sort.
//!
//! # Algorithm
//!
//! 1. Sequences of length 0 or 1 are already sorted
//! 2. Split at the midpoint: the left half has `⌊n/2⌋` elements
//! 3. Recursively sort both halves
//! 4. Merge by repeatedly taking the smaller front element; on equal keys
//!    the left element wins, which keeps the sort stable
//!
//! O(n log n) comparisons, O(n) auxiliary space per merge level.

use crate::candidate::Candidate;

/// Returns a new vector with `items` sorted ascending by `key`.
///
/// Elements with equal keys keep their relative input order.
///
/// # Examples
///
/// ```
/// use u_subset::sort::merge_sort_by_key;
///
/// let words = ["pear", "fig", "kiwi", "yam"];
/// let sorted = merge_sort_by_key(&words, |w| w.len());
/// assert_eq!(sorted, ["fig", "yam", "pear", "kiwi"]);
/// ```
pub fn merge_sort_by_key<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    sort_owned(items.to_vec(), &key)
}

/// Sorts candidates ascending by weight, preserving input order on ties.
///
/// The input is left untouched; a new sequence is returned.
pub fn sort_by_weight(candidates: &[Candidate]) -> Vec<Candidate> {
    merge_sort_by_key(candidates, Candidate::weight)
}

fn sort_owned<T, K, F>(mut items: Vec<T>, key: &F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = sort_owned(items, key);
    let right = sort_owned(right, key);
    merge(left, right, key)
}

fn merge<T, K, F>(left: Vec<T>, right: Vec<T>, key: &F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => key(l) <= key(r),
            _ => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    // At most one side still has elements.
    merged.extend(left);
    merged.extend(right);
    merged
}
