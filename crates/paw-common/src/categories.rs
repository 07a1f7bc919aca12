//! Health category and shape classification taxonomies.
//!
//! Every observation carries exactly one [`HealthCategory`] and one
//! [`ShapeClass`]. The category taxonomy is closed (three variants) and feeds
//! the per-pet tallies and the comparison rule engines. The shape vocabulary
//! is open and defined by the record store's classifier; this crate treats it
//! as an opaque categorical value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health category of a single observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthCategory {
    /// Observation looks normal.
    Healthy,
    /// Observation is off-baseline but not alarming.
    Warning,
    /// Observation warrants attention.
    Concerning,
}

impl HealthCategory {
    /// Get all category variants in tally order.
    pub fn all() -> &'static [HealthCategory] {
        &[
            HealthCategory::Healthy,
            HealthCategory::Warning,
            HealthCategory::Concerning,
        ]
    }

    /// Get the index of this category (matches tally array order).
    pub fn index(&self) -> usize {
        match self {
            HealthCategory::Healthy => 0,
            HealthCategory::Warning => 1,
            HealthCategory::Concerning => 2,
        }
    }

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            HealthCategory::Healthy => "healthy",
            HealthCategory::Warning => "warning",
            HealthCategory::Concerning => "concerning",
        }
    }
}

impl fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Shape classification of an observation.
///
/// Open vocabulary assigned upstream (e.g. `normal`, `soft`, `watery`,
/// `hard`). Distribution tallies preserve first-appearance order of these
/// values, so the wrapper deliberately does no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeClass(pub String);

impl ShapeClass {
    /// Create a shape class from a store-provided label.
    pub fn new(label: impl Into<String>) -> Self {
        ShapeClass(label.into())
    }

    /// The raw label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ShapeClass {
    fn from(label: &str) -> Self {
        ShapeClass(label.to_string())
    }
}
