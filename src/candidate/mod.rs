//! Candidates and the synthetic candidate set builder.
//!
//! A [`Candidate`] is validated once at construction. [`CandidateBuilder`]
//! produces reproducible synthetic sets from a seeded RNG, which is useful
//! for demos, benchmarks, and tests.

mod builder;
mod config;
mod types;

pub use builder::CandidateBuilder;
pub use config::{BuilderConfig, DEFAULT_LABELS};
pub use types::Candidate;
