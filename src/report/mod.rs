//! Plain-text rendering of a solve outcome.

use crate::candidate::Candidate;
use crate::knapsack::Outcome;
use std::fmt;

const RULE_WIDTH: usize = 56;

/// Text report for an [`Outcome`].
///
/// The outcome's indices are resolved against `candidates`, which must be
/// the same set the outcome was solved on.
///
/// # Examples
///
/// ```
/// use u_subset::candidate::Candidate;
/// use u_subset::knapsack::solve;
/// use u_subset::report::Report;
///
/// let candidates = vec![
///     Candidate::new("Ana", 10, 0.9).unwrap(),
///     Candidate::new("Bruno", 20, 0.5).unwrap(),
/// ];
/// let outcome = solve(&candidates, 25).unwrap();
/// let text = Report::new(&candidates, 25, &outcome).to_string();
/// assert!(text.contains("Total weight:   10"));
/// assert!(text.contains("Shortfall:      15"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    candidates: &'a [Candidate],
    capacity: u64,
    outcome: &'a Outcome,
}

impl<'a> Report<'a> {
    pub fn new(candidates: &'a [Candidate], capacity: u64, outcome: &'a Outcome) -> Self {
        Self {
            candidates,
            capacity,
            outcome,
        }
    }

    /// Capacity left unused by the selection.
    pub fn shortfall(&self) -> u64 {
        self.capacity.saturating_sub(self.outcome.weight)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:=^width$}", " SELECTION REPORT ", width = RULE_WIDTH)?;
        writeln!(f, "Capacity:       {}", self.capacity)?;
        writeln!(f, "Total weight:   {}", self.outcome.weight)?;
        writeln!(f, "Total score:    {:.2}", self.outcome.score)?;
        writeln!(f, "Shortfall:      {}", self.shortfall())?;
        writeln!(f)?;

        if self.outcome.is_empty() {
            writeln!(f, "No candidate fits the capacity.")?;
        } else {
            writeln!(f, "Selected candidates:")?;
            for c in self.outcome.selected(self.candidates) {
                writeln!(
                    f,
                    " - {}: weight {} (reliability {:.2})",
                    c.label(),
                    c.weight(),
                    c.reliability()
                )?;
            }
        }
        write!(f, "{}", "=".repeat(RULE_WIDTH))
    }
}
