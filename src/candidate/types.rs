//! The candidate record.

use crate::error::SelectError;

/// A selectable item: an informational label, a non-negative integral
/// weight, and a reliability score in `[0.0, 1.0]`.
///
/// Candidates are validated once at construction and are read-only
/// afterwards. The optimizer assumes every `Candidate` it sees is valid.
///
/// # Examples
///
/// ```
/// use u_subset::candidate::Candidate;
///
/// let c = Candidate::new("Ana", 40, 0.87).unwrap();
/// assert_eq!(c.weight(), 40);
/// assert!(Candidate::new("Bruno", -1, 0.5).is_err());
/// assert!(Candidate::new("Carlos", 10, 1.2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CandidateRecord"))]
pub struct Candidate {
    label: String,
    weight: u64,
    reliability: f64,
}

impl Candidate {
    /// Validates and builds a candidate.
    ///
    /// Fails with [`SelectError::MalformedCandidate`] if `weight < 0` or
    /// `reliability` is not a finite number in `[0, 1]`.
    pub fn new(
        label: impl Into<String>,
        weight: i64,
        reliability: f64,
    ) -> Result<Self, SelectError> {
        let label = label.into();
        match u64::try_from(weight) {
            Ok(weight) => Self::from_unsigned(label, weight, reliability),
            Err(_) => Err(SelectError::MalformedCandidate {
                label,
                reason: format!("weight must be non-negative, got {weight}"),
            }),
        }
    }

    /// Like [`Candidate::new`] for weights that are already unsigned.
    pub fn from_unsigned(
        label: impl Into<String>,
        weight: u64,
        reliability: f64,
    ) -> Result<Self, SelectError> {
        let label = label.into();
        if !reliability.is_finite() || !(0.0..=1.0).contains(&reliability) {
            return Err(SelectError::MalformedCandidate {
                label,
                reason: format!("reliability must be within [0, 1], got {reliability}"),
            });
        }
        Ok(Self {
            label,
            weight,
            // Normalizes -0.0 so score sums never carry a negative zero.
            reliability: reliability + 0.0,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn reliability(&self) -> f64 {
        self.reliability
    }
}

/// Wire shape used to route deserialization through [`Candidate::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct CandidateRecord {
    label: String,
    weight: i64,
    reliability: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<CandidateRecord> for Candidate {
    type Error = SelectError;

    fn try_from(record: CandidateRecord) -> Result<Self, Self::Error> {
        Candidate::new(record.label, record.weight, record.reliability)
    }
}
