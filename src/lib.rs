//! Exact capacity-constrained subset selection.
//!
//! Picks the subset of weighted, scored candidates that maximizes a
//! lexicographic objective (cumulative score, then cumulative weight) while
//! keeping total weight within a capacity. The answer is optimal and
//! deterministic for fixed inputs.
//!
//! - **Candidates**: Validated `(label, weight, reliability)` records and a
//!   seeded synthetic [`CandidateBuilder`](candidate::CandidateBuilder).
//! - **Sort**: Stable merge sort used to normalize candidate order.
//! - **Knapsack**: The exact optimizer, memoized top-down or tabulated
//!   bottom-up over `(position, remaining capacity)`.
//! - **Report**: Plain-text rendering of an outcome.
//!
//! # Pipeline
//!
//! ```
//! use u_subset::candidate::{BuilderConfig, CandidateBuilder};
//! use u_subset::report::Report;
//! use u_subset::{solve, sort_by_weight};
//!
//! let candidates = CandidateBuilder::generate(&BuilderConfig::default().with_seed(42)).unwrap();
//! let candidates = sort_by_weight(&candidates);
//! let outcome = solve(&candidates, 300).unwrap();
//! assert!(outcome.weight <= 300);
//! println!("{}", Report::new(&candidates, 300, &outcome));
//! ```

pub mod candidate;
pub mod error;
pub mod knapsack;
pub mod report;
pub mod sort;

pub use error::SelectError;
pub use knapsack::solve;
pub use sort::sort_by_weight;
