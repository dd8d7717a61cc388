//! Seeded synthetic candidate generation.

use super::config::BuilderConfig;
use super::types::Candidate;
use crate::error::SelectError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates candidate sets from a [`BuilderConfig`].
pub struct CandidateBuilder;

impl CandidateBuilder {
    /// Produces one candidate per configured label.
    ///
    /// Weights are uniform over the inclusive weight range. Reliabilities
    /// are uniform over the inclusive reliability range, rounded to two
    /// decimals. The same seed and config always yield the same set.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_subset::candidate::{BuilderConfig, CandidateBuilder};
    ///
    /// let config = BuilderConfig::default().with_seed(42);
    /// let a = CandidateBuilder::generate(&config).unwrap();
    /// let b = CandidateBuilder::generate(&config).unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(a.len(), 26);
    /// ```
    pub fn generate(config: &BuilderConfig) -> Result<Vec<Candidate>, SelectError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        log::debug!(
            "generating {} candidates (seed {seed})",
            config.labels.len()
        );

        config
            .labels
            .iter()
            .map(|label| {
                let weight = rng.random_range(config.min_weight..=config.max_weight);
                let raw = rng.random_range(config.min_reliability..=config.max_reliability);
                let reliability = round2(raw).clamp(config.min_reliability, config.max_reliability);
                Candidate::from_unsigned(label.as_str(), weight, reliability)
            })
            .collect()
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
