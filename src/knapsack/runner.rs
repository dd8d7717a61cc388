//! Exact subset optimizer.
//!
//! # Algorithm
//!
//! For position `i` and remaining capacity `r`:
//!
//! 1. `i == n`: the empty selection, `(0, 0)`
//! 2. exclude = best(i + 1, r)
//! 3. include = infeasible if `weight[i] > r`, otherwise
//!    best(i + 1, r - weight[i]) plus candidate `i`
//! 4. keep include only if it is strictly better than exclude under the
//!    lexicographic `(score, weight)` order; full ties keep exclude
//!
//! The optimum of a sub-problem depends only on `(i, r)`, so each state is
//! evaluated once. Total work is `O(n × capacity)`. Every state records
//! whether it took its candidate; the selection is rebuilt by replaying
//! those decisions from `(0, capacity)`.

use super::config::{SolverConfig, Strategy};
use super::types::{Evaluation, Objective, Outcome};
use crate::candidate::Candidate;
use crate::error::SelectError;
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a [`SubsetRunner`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectResult {
    /// The optimal outcome.
    pub outcome: Outcome,

    /// Number of `(position, remaining capacity)` states evaluated.
    pub states_evaluated: usize,

    /// Strategy that produced the outcome; never [`Strategy::Auto`].
    pub strategy: Strategy,
}

/// Solves with the default configuration.
///
/// Fails with [`SelectError::InvalidCapacity`] if `capacity < 0`.
pub fn solve(candidates: &[Candidate], capacity: i64) -> Result<Outcome, SelectError> {
    SubsetRunner::run(candidates, capacity, &SolverConfig::default()).map(|r| r.outcome)
}

/// Executes the exact subset optimizer.
pub struct SubsetRunner;

impl SubsetRunner {
    /// Computes the feasible subset with the lexicographically greatest
    /// `(score, weight)`.
    ///
    /// Each call owns a fresh cache; nothing carries over between calls.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_subset::candidate::Candidate;
    /// use u_subset::knapsack::{SolverConfig, Strategy, SubsetRunner};
    ///
    /// let candidates = vec![Candidate::new("only", 50, 0.8).unwrap()];
    /// let config = SolverConfig::default().with_strategy(Strategy::Memoized);
    /// let result = SubsetRunner::run(&candidates, 10, &config).unwrap();
    /// assert!(result.outcome.is_empty());
    /// assert_eq!(result.outcome.weight, 0);
    /// ```
    pub fn run(
        candidates: &[Candidate],
        capacity: i64,
        config: &SolverConfig,
    ) -> Result<SelectResult, SelectError> {
        config.validate()?;
        let capacity =
            u64::try_from(capacity).map_err(|_| SelectError::InvalidCapacity(capacity))?;

        // Remaining capacity beyond the total weight never changes a decision.
        let total_weight = candidates
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.weight()));
        let effective = capacity.min(total_weight);

        let bound = state_bound(candidates.len(), effective);
        let too_large = |limit| SelectError::StateSpaceTooLarge {
            candidates: candidates.len(),
            capacity,
            limit,
        };
        if let Some(limit) = config.max_states {
            match bound {
                Some(states) if states <= limit => {}
                _ => return Err(too_large(limit)),
            }
        }

        let strategy = config.strategy.resolve(bound);
        log::debug!(
            "solving {} candidates at capacity {capacity} (effective {effective}) with {strategy:?}",
            candidates.len(),
        );

        let (outcome, states_evaluated) = match strategy {
            Strategy::Tabulated => {
                let width = bound
                    .and_then(|_| usize::try_from(effective).ok())
                    .and_then(|c| c.checked_add(1))
                    .ok_or_else(|| too_large(usize::MAX))?;
                tabulate(candidates, width).ok_or_else(|| too_large(usize::MAX))?
            }
            Strategy::Memoized | Strategy::Auto => Memo::new(candidates).solve(effective),
        };

        log::debug!(
            "selected {} of {} candidates: score {:.4}, weight {} ({states_evaluated} states)",
            outcome.selection.len(),
            candidates.len(),
            outcome.score,
            outcome.weight
        );

        Ok(SelectResult {
            outcome,
            states_evaluated,
            strategy,
        })
    }

    /// Solves independent `(candidates, capacity)` problems.
    ///
    /// Results come back in input order. With the `parallel` feature the
    /// problems are spread across the rayon thread pool; every solve still
    /// owns its own cache.
    pub fn run_many(
        problems: &[(Vec<Candidate>, i64)],
        config: &SolverConfig,
    ) -> Vec<Result<SelectResult, SelectError>> {
        let solve_one = |(candidates, capacity): &(Vec<Candidate>, i64)| {
            Self::run(candidates, *capacity, config)
        };

        #[cfg(feature = "parallel")]
        let results = problems.par_iter().map(solve_one).collect();
        #[cfg(not(feature = "parallel"))]
        let results = problems.iter().map(solve_one).collect();

        results
    }
}

/// `n × (capacity + 1)`, or `None` if it does not fit in `usize`.
fn state_bound(n: usize, capacity: u64) -> Option<usize> {
    usize::try_from(capacity)
        .ok()?
        .checked_add(1)?
        .checked_mul(n)
}

/// Best objective from one state and whether it includes its candidate.
#[derive(Debug, Clone, Copy)]
struct Cell {
    best: Objective,
    take: bool,
}

fn decide(include: Evaluation, exclude: Objective) -> Cell {
    match include {
        Evaluation::Feasible(best) if include.beats(&Evaluation::Feasible(exclude)) => {
            Cell { best, take: true }
        }
        _ => Cell {
            best: exclude,
            take: false,
        },
    }
}

fn include_branch(
    candidate: &Candidate,
    remaining: u64,
    rest: impl FnOnce(u64) -> Objective,
) -> Evaluation {
    if candidate.weight() > remaining {
        Evaluation::Infeasible
    } else {
        Evaluation::Feasible(rest(remaining - candidate.weight()).with(candidate))
    }
}

/// Top-down evaluation with an explicit per-solve cache.
///
/// States waiting on sub-results are kept on a work stack instead of the
/// call stack, so depth is bounded by memory rather than thread stack size.
struct Memo<'a> {
    candidates: &'a [Candidate],
    cache: HashMap<(usize, u64), Cell>,
}

impl<'a> Memo<'a> {
    fn new(candidates: &'a [Candidate]) -> Self {
        Self {
            candidates,
            cache: HashMap::new(),
        }
    }

    fn solve(mut self, capacity: u64) -> (Outcome, usize) {
        self.evaluate(0, capacity);
        let root = self.best(0, capacity);

        let mut selection = Vec::new();
        let mut remaining = capacity;
        for (i, candidate) in self.candidates.iter().enumerate() {
            if self.cache.get(&(i, remaining)).is_some_and(|cell| cell.take) {
                selection.push(i);
                remaining -= candidate.weight();
            }
        }

        let outcome = Outcome {
            score: root.score,
            weight: root.weight,
            selection,
        };
        (outcome, self.cache.len())
    }

    /// Best objective of an already evaluated state.
    fn best(&self, i: usize, remaining: u64) -> Objective {
        self.cache
            .get(&(i, remaining))
            .map_or(Objective::ZERO, |cell| cell.best)
    }

    fn is_resolved(&self, state: (usize, u64)) -> bool {
        state.0 >= self.candidates.len() || self.cache.contains_key(&state)
    }

    /// Evaluates `(i, remaining)` and every state it depends on.
    fn evaluate(&mut self, i: usize, remaining: u64) {
        let candidates = self.candidates;
        let mut stack = vec![(i, remaining)];

        while let Some(&(i, remaining)) = stack.last() {
            if self.is_resolved((i, remaining)) {
                stack.pop();
                continue;
            }
            let candidate = &candidates[i];

            let exclude_state = (i + 1, remaining);
            let include_state = remaining
                .checked_sub(candidate.weight())
                .map(|rest| (i + 1, rest));
            let pending: Vec<(usize, u64)> = std::iter::once(exclude_state)
                .chain(include_state)
                .filter(|&state| !self.is_resolved(state))
                .collect();
            if !pending.is_empty() {
                stack.extend(pending);
                continue;
            }

            let exclude = self.best(i + 1, remaining);
            let include = include_branch(candidate, remaining, |r| self.best(i + 1, r));
            self.cache.insert((i, remaining), decide(include, exclude));
            stack.pop();
        }
    }
}

/// Bottom-up evaluation over positions `n - 1 ..= 0`.
///
/// `width` is `capacity + 1`. Only the row for position `i + 1` is kept
/// while filling row `i`; decisions are kept for every state. Returns
/// `None` if the table cannot be allocated.
fn tabulate(candidates: &[Candidate], width: usize) -> Option<(Outcome, usize)> {
    let n = candidates.len();
    let mut next = try_filled(width, Objective::ZERO)?;
    let mut current = try_filled(width, Objective::ZERO)?;
    let mut take = try_filled(n.checked_mul(width)?, false)?;

    for (i, candidate) in candidates.iter().enumerate().rev() {
        for r in 0..width {
            let include = include_branch(candidate, r as u64, |rest| next[rest as usize]);
            let cell = decide(include, next[r]);
            current[r] = cell.best;
            take[i * width + r] = cell.take;
        }
        std::mem::swap(&mut next, &mut current);
    }

    let capacity = width - 1;
    let root = next[capacity];

    let mut selection = Vec::new();
    let mut remaining = capacity;
    for (i, candidate) in candidates.iter().enumerate() {
        if take[i * width + remaining] {
            selection.push(i);
            remaining -= candidate.weight() as usize;
        }
    }

    let outcome = Outcome {
        score: root.score,
        weight: root.weight,
        selection,
    };
    Some((outcome, n * width))
}

fn try_filled<T: Clone>(len: usize, value: T) -> Option<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).ok()?;
    v.resize(len, value);
    Some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
    use proptest::strategy::Strategy as PropStrategy;

    const STRATEGIES: [Strategy; 3] = [Strategy::Memoized, Strategy::Tabulated, Strategy::Auto];

    fn cands(spec: &[(&str, i64, f64)]) -> Vec<Candidate> {
        spec.iter()
            .map(|&(label, weight, reliability)| Candidate::new(label, weight, reliability).unwrap())
            .collect()
    }

    fn run_with(candidates: &[Candidate], capacity: i64, strategy: Strategy) -> Outcome {
        let config = SolverConfig::default().with_strategy(strategy);
        SubsetRunner::run(candidates, capacity, &config).unwrap().outcome
    }

    /// Exhaustive search over all subsets with the same tie-break-free
    /// objective; only the `(score, weight)` pair is comparable.
    fn brute_force(candidates: &[Candidate], capacity: u64) -> Objective {
        let n = candidates.len();
        let mut best = Objective::ZERO;
        for mask in 0u32..(1 << n) {
            let mut obj = Objective::ZERO;
            for (i, c) in candidates.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    obj = obj.with(c);
                }
            }
            if obj.weight <= capacity && obj.cmp_lex(&best).is_gt() {
                best = obj;
            }
        }
        best
    }

    // ---- Concrete scenarios ----

    #[test]
    fn test_three_candidate_scenario() {
        let candidates = cands(&[("A", 10, 0.9), ("B", 20, 0.5), ("C", 15, 0.95)]);
        for strategy in STRATEGIES {
            let outcome = run_with(&candidates, 25, strategy);
            assert_eq!(outcome.selection, vec![0, 2], "{strategy:?}");
            assert_eq!(outcome.weight, 25);
            assert!((outcome.score - 1.85).abs() < 1e-9, "score {}", outcome.score);
        }
    }

    #[test]
    fn test_nothing_fits() {
        let candidates = cands(&[("big", 50, 0.99)]);
        for strategy in STRATEGIES {
            assert_eq!(run_with(&candidates, 10, strategy), Outcome::empty());
        }
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let candidates = cands(&[("A", 10, 0.9)]);
        for strategy in STRATEGIES {
            let config = SolverConfig::default().with_strategy(strategy);
            assert_eq!(
                SubsetRunner::run(&candidates, -5, &config),
                Err(SelectError::InvalidCapacity(-5))
            );
        }
        assert_eq!(solve(&[], -1), Err(SelectError::InvalidCapacity(-1)));
    }

    #[test]
    fn test_empty_input() {
        for capacity in [0, 1, 300] {
            for strategy in STRATEGIES {
                assert_eq!(run_with(&[], capacity, strategy), Outcome::empty());
            }
        }
    }

    #[test]
    fn test_zero_capacity_takes_only_zero_weight() {
        let candidates = cands(&[("free", 0, 0.3), ("paid", 3, 0.9), ("nothing", 0, 0.0)]);
        for strategy in STRATEGIES {
            let outcome = run_with(&candidates, 0, strategy);
            // the zero-weight, zero-reliability candidate is a full tie and is left out
            assert_eq!(outcome.selection, vec![0]);
            assert_eq!(outcome.weight, 0);
            assert!((outcome.score - 0.3).abs() < 1e-12);
        }
    }

    #[test]
    fn test_full_tie_prefers_exclude() {
        // {A} and {B} tie exactly; excluding A at position 0 wins.
        let candidates = cands(&[("A", 5, 0.5), ("B", 5, 0.5)]);
        for strategy in STRATEGIES {
            assert_eq!(run_with(&candidates, 5, strategy).selection, vec![1]);
        }
    }

    #[test]
    fn test_weight_breaks_score_tie() {
        // Same score, the heavier pair reaches closer to capacity.
        let candidates = cands(&[("light", 4, 0.5), ("heavy", 9, 0.5)]);
        for strategy in STRATEGIES {
            let outcome = run_with(&candidates, 10, strategy);
            assert_eq!(outcome.selection, vec![1]);
            assert_eq!(outcome.weight, 9);
        }
    }

    #[test]
    fn test_score_beats_weight() {
        let candidates = cands(&[("reliable", 2, 0.9), ("heavy", 10, 0.8)]);
        for strategy in STRATEGIES {
            let outcome = run_with(&candidates, 10, strategy);
            assert_eq!(outcome.selection, vec![0]);
        }
    }

    #[test]
    fn test_idempotent() {
        let candidates = cands(&[
            ("a", 7, 0.6),
            ("b", 3, 0.6),
            ("c", 4, 0.6),
            ("d", 10, 0.7),
        ]);
        for strategy in STRATEGIES {
            let first = run_with(&candidates, 10, strategy);
            let second = run_with(&candidates, 10, strategy);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_capacity_above_total_weight() {
        let candidates = cands(&[("a", 1, 0.1), ("b", 2, 0.2)]);
        for strategy in STRATEGIES {
            let outcome = run_with(&candidates, i64::MAX, strategy);
            assert_eq!(outcome.selection, vec![0, 1]);
            assert_eq!(outcome.weight, 3);
        }
    }

    #[test]
    fn test_states_evaluated() {
        let candidates = cands(&[("a", 1, 0.1), ("b", 2, 0.2), ("c", 3, 0.3)]);
        let config = SolverConfig::default().with_strategy(Strategy::Tabulated);
        let result = SubsetRunner::run(&candidates, 4, &config).unwrap();
        assert_eq!(result.states_evaluated, 3 * 5);
        assert_eq!(result.strategy, Strategy::Tabulated);

        let config = SolverConfig::default().with_strategy(Strategy::Memoized);
        let result = SubsetRunner::run(&candidates, 4, &config).unwrap();
        assert!(result.states_evaluated > 0);
        assert!(result.states_evaluated <= 3 * 5);
    }

    #[test]
    fn test_max_states_guard() {
        let candidates = cands(&[("a", 10, 0.1), ("b", 20, 0.2)]);
        let config = SolverConfig::default().with_max_states(10);
        let err = SubsetRunner::run(&candidates, 25, &config).unwrap_err();
        assert_eq!(
            err,
            SelectError::StateSpaceTooLarge {
                candidates: 2,
                capacity: 25,
                limit: 10
            }
        );

        // 2 × (25 + 1) = 52 states fit
        let config = SolverConfig::default().with_max_states(52);
        assert!(SubsetRunner::run(&candidates, 25, &config).is_ok());
    }

    #[test]
    fn test_max_states_counts_effective_capacity() {
        // Total weight is 30, so capacity 1000 is evaluated as 30: 2 × 31 states.
        let candidates = cands(&[("a", 10, 0.1), ("b", 20, 0.2)]);
        let config = SolverConfig::default().with_max_states(62);
        let result = SubsetRunner::run(&candidates, 1_000, &config).unwrap();
        assert_eq!(result.outcome.selection, vec![0, 1]);

        let config = SolverConfig::default().with_max_states(61);
        assert_eq!(
            SubsetRunner::run(&candidates, 1_000, &config),
            Err(SelectError::StateSpaceTooLarge {
                candidates: 2,
                capacity: 1_000,
                limit: 61
            })
        );
    }

    #[test]
    fn test_auto_picks_table_for_small_problems() {
        let candidates = cands(&[("A", 10, 0.9), ("B", 20, 0.5), ("C", 15, 0.95)]);
        let result = SubsetRunner::run(&candidates, 25, &SolverConfig::default()).unwrap();
        assert_eq!(result.strategy, Strategy::Tabulated);
    }

    #[test]
    fn test_huge_weight_solved_without_dense_table() {
        let candidates = cands(&[("A", 1 << 40, 0.5)]);
        let outcome = solve(&candidates, 1 << 40).unwrap();
        assert_eq!(outcome.selection, vec![0]);
        assert_eq!(outcome.weight, 1 << 40);
        assert!((outcome.score - 0.5).abs() < 1e-12);

        let result = SubsetRunner::run(&candidates, 1 << 40, &SolverConfig::default()).unwrap();
        assert_eq!(result.strategy, Strategy::Memoized);
        assert_eq!(result.states_evaluated, 1);
    }

    #[test]
    fn test_tabulated_unallocatable_table_is_an_error() {
        let candidates = cands(&[("A", 1 << 60, 0.5)]);
        let config = SolverConfig::default().with_strategy(Strategy::Tabulated);
        assert_eq!(
            SubsetRunner::run(&candidates, 1 << 60, &config),
            Err(SelectError::StateSpaceTooLarge {
                candidates: 1,
                capacity: 1 << 60,
                limit: usize::MAX
            })
        );

        let config = SolverConfig::default().with_strategy(Strategy::Memoized);
        let outcome = SubsetRunner::run(&candidates, 1 << 60, &config).unwrap().outcome;
        assert_eq!(outcome.selection, vec![0]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SolverConfig::default().with_max_states(0);
        assert!(matches!(
            SubsetRunner::run(&[], 1, &config),
            Err(SelectError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_many_keeps_order() {
        let problems = vec![
            (cands(&[("A", 10, 0.9), ("B", 20, 0.5), ("C", 15, 0.95)]), 25),
            (cands(&[("big", 50, 0.99)]), 10),
            (Vec::new(), -3),
        ];
        let results = SubsetRunner::run_many(&problems, &SolverConfig::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().outcome.selection, vec![0, 2]);
        assert!(results[1].as_ref().unwrap().outcome.is_empty());
        assert_eq!(results[2], Err(SelectError::InvalidCapacity(-3)));
    }

    #[test]
    fn test_deep_chain_memoized() {
        let candidates: Vec<Candidate> = (0..100_000)
            .map(|i| Candidate::new(format!("c{i}"), 1, 0.5).unwrap())
            .collect();
        let outcome = run_with(&candidates, 10, Strategy::Memoized);
        assert_eq!(outcome.weight, 10);
        // full ties keep exclude, so the last ten candidates are taken
        assert_eq!(outcome.selection, (99_990..100_000).collect::<Vec<_>>());
    }

    #[test]
    fn test_deep_chain_tabulated() {
        let candidates: Vec<Candidate> = (0..5_000)
            .map(|i| Candidate::new(format!("c{i}"), 1, 0.5).unwrap())
            .collect();
        let outcome = run_with(&candidates, 10, Strategy::Tabulated);
        assert_eq!(outcome.weight, 10);
        assert_eq!(outcome.selection.len(), 10);
    }

    // ---- Properties ----

    // Reliabilities are multiples of 1/64 so every subset sum is exact and
    // brute force and the optimizer agree bit-for-bit.
    fn arb_candidates(max_len: usize) -> impl PropStrategy<Value = Vec<Candidate>> {
        proptest::collection::vec((0i64..=20, 0u32..=64), 0..=max_len).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (w, k))| Candidate::new(format!("c{i}"), w, k as f64 / 64.0).unwrap())
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_optimal_and_feasible(candidates in arb_candidates(10), capacity in 0i64..=80) {
            for strategy in STRATEGIES {
                let outcome = run_with(&candidates, capacity, strategy);

                let used: u64 = outcome.selection.iter().map(|&i| candidates[i].weight()).sum();
                prop_assert!(used <= capacity as u64);
                prop_assert_eq!(used, outcome.weight);

                let mut sorted = outcome.selection.clone();
                sorted.dedup();
                prop_assert_eq!(&sorted, &outcome.selection);
                prop_assert!(outcome.selection.windows(2).all(|w| w[0] < w[1]));
                prop_assert!(outcome.selection.iter().all(|&i| i < candidates.len()));

                let score: f64 = outcome.selection.iter().map(|&i| candidates[i].reliability()).sum();
                prop_assert_eq!(score, outcome.score);

                prop_assert_eq!(outcome.objective(), brute_force(&candidates, capacity as u64));
            }
        }

        #[test]
        fn prop_strategies_agree(candidates in arb_candidates(12), capacity in 0i64..=120) {
            prop_assert_eq!(
                run_with(&candidates, capacity, Strategy::Memoized),
                run_with(&candidates, capacity, Strategy::Tabulated)
            );
        }

        #[test]
        fn prop_monotone_in_capacity(
            candidates in arb_candidates(10),
            capacity in 0i64..=60,
            extra in 0i64..=30,
        ) {
            let low = run_with(&candidates, capacity, Strategy::Tabulated);
            let high = run_with(&candidates, capacity + extra, Strategy::Tabulated);
            prop_assert!(high.score >= low.score);
        }
    }
}
