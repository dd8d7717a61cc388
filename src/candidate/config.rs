//! Synthetic candidate generation parameters.

use crate::error::SelectError;

/// Default label roster: one candidate is generated per label.
pub const DEFAULT_LABELS: [&str; 26] = [
    "Ana", "Bruno", "Carlos", "Diana", "Eduardo", "Fernanda", "Gabriel", "Helena", "Igor",
    "Júlia", "Kleber", "Larissa", "Marcos", "Natália", "Otávio", "Patrícia", "Quintino", "Renata",
    "Samuel", "Talita", "Uéliton", "Vitória", "Wesley", "Xênia", "Yuri", "Zuleica",
];

/// Configuration for [`CandidateBuilder`](super::CandidateBuilder).
///
/// # Examples
///
/// ```
/// use u_subset::candidate::BuilderConfig;
///
/// let config = BuilderConfig::default()
///     .with_weight_range(5, 50)
///     .with_reliability_range(0.6, 0.9)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.labels.len(), 26);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuilderConfig {
    /// One candidate is produced per label, in this order.
    pub labels: Vec<String>,

    /// Inclusive lower bound for generated weights.
    pub min_weight: u64,

    /// Inclusive upper bound for generated weights.
    pub max_weight: u64,

    /// Inclusive lower bound for generated reliabilities.
    pub min_reliability: f64,

    /// Inclusive upper bound for generated reliabilities.
    pub max_reliability: f64,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            min_weight: 10,
            max_weight: 120,
            min_reliability: 0.50,
            max_reliability: 0.99,
            seed: None,
        }
    }
}

impl BuilderConfig {
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_weight_range(mut self, min: u64, max: u64) -> Self {
        self.min_weight = min;
        self.max_weight = max;
        self
    }

    pub fn with_reliability_range(mut self, min: f64, max: f64) -> Self {
        self.min_reliability = min;
        self.max_reliability = max;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SelectError> {
        if self.min_weight > self.max_weight {
            return Err(SelectError::InvalidConfig(format!(
                "min_weight {} exceeds max_weight {}",
                self.min_weight, self.max_weight
            )));
        }
        let in_unit = |x: f64| x.is_finite() && (0.0..=1.0).contains(&x);
        if !in_unit(self.min_reliability) || !in_unit(self.max_reliability) {
            return Err(SelectError::InvalidConfig(format!(
                "reliability range [{}, {}] must lie within [0, 1]",
                self.min_reliability, self.max_reliability
            )));
        }
        if self.min_reliability > self.max_reliability {
            return Err(SelectError::InvalidConfig(format!(
                "min_reliability {} exceeds max_reliability {}",
                self.min_reliability, self.max_reliability
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuilderConfig::default();
        assert_eq!(config.labels.len(), 26);
        assert_eq!(config.min_weight, 10);
        assert_eq!(config.max_weight, 120);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_weight_range() {
        let config = BuilderConfig::default().with_weight_range(50, 10);
        assert!(config.validate().is_err());
        assert!(BuilderConfig::default()
            .with_weight_range(7, 7)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_reliability_range() {
        assert!(BuilderConfig::default()
            .with_reliability_range(0.9, 0.1)
            .validate()
            .is_err());
        assert!(BuilderConfig::default()
            .with_reliability_range(-0.1, 0.5)
            .validate()
            .is_err());
        assert!(BuilderConfig::default()
            .with_reliability_range(0.5, f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_with_labels() {
        let config = BuilderConfig::default().with_labels(["x", "y"]);
        assert_eq!(config.labels, vec!["x".to_string(), "y".to_string()]);
    }
}
