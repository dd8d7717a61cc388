//! Exact capacity-constrained subset optimizer.
//!
//! Selects the subset of candidates whose total weight stays within a
//! capacity and whose `(score, weight)` pair is lexicographically greatest:
//! cumulative reliability first, cumulative weight as the tie-break.
//!
//! This is the 0/1 knapsack recurrence over `(position, remaining capacity)`
//! with a lexicographic objective instead of a single additive value.
//!
//! # Key Types
//!
//! - [`SubsetRunner`]: Runs a solve with a [`SolverConfig`]
//! - [`Outcome`]: Score, weight, and selected indices
//! - [`Evaluation`]: Feasible objective or the infeasible marker
//! - [`Strategy`]: Memoized (top-down), tabulated (bottom-up), or chosen by size
//!
//! # References
//!
//! - Bellman (1957), *Dynamic Programming*
//! - Kellerer, Pferschy & Pisinger (2004), *Knapsack Problems*

mod config;
mod runner;
mod types;

pub use config::{SolverConfig, Strategy, DENSE_STATE_LIMIT};
pub use runner::{solve, SelectResult, SubsetRunner};
pub use types::{Evaluation, Objective, Outcome};
