//! Domain model for the comparison engine.
//!
//! These types are the structured inputs of a comparison: immutable
//! observations fetched from the record store, read-only pet profiles
//! resolved by the ownership gate, and the analysis window that bounds an
//! aggregation. Everything derived from them lives in the reducer modules.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use paw_common::{HealthCategory, PetId, ShapeClass};
use serde::{Deserialize, Serialize};

/// A single timestamped health observation.
///
/// Created and destroyed entirely outside this engine; treated as immutable
/// input here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// The pet this observation belongs to.
    pub pet_id: PetId,

    /// When the observation was recorded.
    pub recorded_at: DateTime<Utc>,

    /// Health category assigned at logging time.
    pub category: HealthCategory,

    /// Shape classification from the upstream classifier.
    pub shape: ShapeClass,

    /// Classifier confidence, 0-100.
    ///
    /// Carried for display; no aggregation rule consumes it.
    pub confidence: u8,
}

/// Read-only profile of a tracked pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetProfile {
    /// Pet identifier.
    pub id: PetId,

    /// Display name.
    pub name: String,

    /// Species ("dog", "cat", ...).
    pub species: String,

    /// Breed, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,

    /// Age in months, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_months: Option<u32>,

    /// Weight in kilograms, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,

    /// Avatar image URL, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// The time range and day count bounding one aggregation.
///
/// Day bucketing uses the UTC calendar date of each observation so the
/// grouping key is identical for every pet compared together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisWindow {
    /// Inclusive start of the window.
    pub start: DateTime<Utc>,

    /// Inclusive end of the window.
    pub end: DateTime<Utc>,

    /// Number of days the window spans.
    pub days: u32,
}

impl AnalysisWindow {
    /// Build the trailing window `[end - days, end]`.
    pub fn trailing(end: DateTime<Utc>, days: u32) -> Self {
        AnalysisWindow {
            start: end - Duration::days(i64::from(days)),
            end,
            days,
        }
    }

    /// UTC calendar-day key for an observation timestamp.
    pub fn day_key(ts: DateTime<Utc>) -> NaiveDate {
        ts.date_naive()
    }
}
