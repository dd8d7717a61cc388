//! Solver configuration.

use crate::error::SelectError;

/// How the `(position, remaining capacity)` recurrence is evaluated.
///
/// Every strategy is exact and returns identical outcomes, including the
/// same choice among equal optima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// [`Tabulated`](Strategy::Tabulated) when the dense table has at most
    /// [`DENSE_STATE_LIMIT`] states, [`Memoized`](Strategy::Memoized)
    /// otherwise.
    #[default]
    Auto,

    /// Top-down evaluation with a hash-map cache keyed by
    /// `(position, remaining capacity)`.
    ///
    /// Touches only reachable states, which pays off when capacity is large
    /// relative to the weights. Pending states live on an explicit work
    /// stack, so long candidate lists do not grow the call stack.
    Memoized,

    /// Bottom-up table filled from the last position to the first.
    ///
    /// Evaluates all `n × (min(capacity, total weight) + 1)` states without
    /// recursion. Keeps
    /// two rolling value rows and one decision bit per state. Fails with
    /// [`SelectError::StateSpaceTooLarge`] if the table cannot be allocated.
    Tabulated,
}

/// Largest dense table [`Strategy::Auto`] will allocate, in states.
pub const DENSE_STATE_LIMIT: usize = 1 << 24;

impl Strategy {
    /// Resolves [`Strategy::Auto`] for a table of `states` states
    /// (`None` when the count overflows `usize`).
    pub fn resolve(self, states: Option<usize>) -> Strategy {
        match (self, states) {
            (Strategy::Auto, Some(states)) if states <= DENSE_STATE_LIMIT => Strategy::Tabulated,
            (Strategy::Auto, _) => Strategy::Memoized,
            (strategy, _) => strategy,
        }
    }
}

/// Configuration for [`SubsetRunner`](super::SubsetRunner).
///
/// # Examples
///
/// ```
/// use u_subset::knapsack::{SolverConfig, Strategy};
///
/// let config = SolverConfig::default()
///     .with_strategy(Strategy::Memoized)
///     .with_max_states(1_000_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Recurrence evaluation strategy.
    pub strategy: Strategy,

    /// Ceiling on `candidates × (min(capacity, total weight) + 1)`.
    /// `None` = no limit.
    ///
    /// Runtime is a deterministic function of that product, so this is the
    /// knob for bounding latency.
    pub max_states: Option<usize>,
}

impl SolverConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = Some(max_states);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SelectError> {
        if self.max_states == Some(0) {
            return Err(SelectError::InvalidConfig(
                "max_states must be positive".into(),
            ));
        }
        Ok(())
    }
}
