//! Deterministic sequence sorting.
//!
//! Normalizes candidate order before optimization. Order never changes the
//! optimal objective, but it fixes report presentation and which of several
//! equal optima is returned, so it must be reproducible.

mod merge;

pub use merge::{merge_sort_by_key, sort_by_weight};
