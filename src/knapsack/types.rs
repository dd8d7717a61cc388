//! Objective values and solve outcomes.

use crate::candidate::Candidate;
use std::cmp::Ordering;

/// Cumulative `(score, weight)` of a selection.
///
/// Ordered lexicographically: higher score wins, and only on exact score
/// equality does higher weight win.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    /// Sum of reliabilities.
    pub score: f64,
    /// Sum of weights.
    pub weight: u64,
}

impl Objective {
    /// The empty selection.
    pub const ZERO: Objective = Objective {
        score: 0.0,
        weight: 0,
    };

    /// Lexicographic comparison: score first, weight on exact score ties.
    pub fn cmp_lex(&self, other: &Objective) -> Ordering {
        self.score
            .partial_cmp(&other.score)
            .unwrap_or(Ordering::Equal)
            .then(self.weight.cmp(&other.weight))
    }

    /// Adds one candidate's contribution.
    pub fn with(self, candidate: &Candidate) -> Objective {
        Objective {
            score: self.score + candidate.reliability(),
            weight: self.weight + candidate.weight(),
        }
    }
}

/// Result of evaluating one branch of the include/exclude decision.
///
/// `Infeasible` marks a selection that would exceed capacity. It ranks
/// strictly below every `Feasible` value, including [`Objective::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    Infeasible,
    Feasible(Objective),
}

impl Evaluation {
    /// Total order over evaluations.
    pub fn cmp_lex(&self, other: &Evaluation) -> Ordering {
        match (self, other) {
            (Evaluation::Infeasible, Evaluation::Infeasible) => Ordering::Equal,
            (Evaluation::Infeasible, Evaluation::Feasible(_)) => Ordering::Less,
            (Evaluation::Feasible(_), Evaluation::Infeasible) => Ordering::Greater,
            (Evaluation::Feasible(a), Evaluation::Feasible(b)) => a.cmp_lex(b),
        }
    }

    /// Whether `self` is strictly better than `other`.
    ///
    /// Full ties are not a win: the optimizer keeps the exclude branch
    /// unless including is strictly better.
    pub fn beats(&self, other: &Evaluation) -> bool {
        self.cmp_lex(other) == Ordering::Greater
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_lex(other))
    }
}

/// The optimal selection returned by a solve.
///
/// # Examples
///
/// ```
/// use u_subset::candidate::Candidate;
/// use u_subset::knapsack::solve;
///
/// let candidates = vec![
///     Candidate::new("A", 10, 0.9).unwrap(),
///     Candidate::new("B", 20, 0.5).unwrap(),
///     Candidate::new("C", 15, 0.95).unwrap(),
/// ];
/// let outcome = solve(&candidates, 25).unwrap();
/// assert_eq!(outcome.selection, vec![0, 2]);
/// assert_eq!(outcome.weight, 25);
/// assert!((outcome.score - 1.85).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    /// Sum of the selected candidates' reliabilities.
    pub score: f64,
    /// Sum of the selected candidates' weights.
    pub weight: u64,
    /// Selected indices into the solved candidate set, ascending.
    pub selection: Vec<usize>,
}

impl Outcome {
    /// The empty selection: score 0, weight 0.
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            weight: 0,
            selection: Vec::new(),
        }
    }

    pub fn objective(&self) -> Objective {
        Objective {
            score: self.score,
            weight: self.weight,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Resolves the selection against the candidate set it was solved on.
    ///
    /// Indices that are out of range for `candidates` are skipped.
    pub fn selected<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
        self.selection
            .iter()
            .filter_map(|&i| candidates.get(i))
            .collect()
    }
}
