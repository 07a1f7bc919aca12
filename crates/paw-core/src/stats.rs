//! Per-pet statistics aggregation.
//!
//! Reduces one pet's observations in a window to categorical counts,
//! integer percentages, a weekly logging rate, and the last observation
//! time. Single pass; never fails. The zero-record case is constructed
//! explicitly rather than falling out of a division.

use chrono::{DateTime, Utc};
use paw_common::HealthCategory;
use serde::{Deserialize, Serialize};

use crate::model::Observation;

/// Aggregated health statistics for one pet over one window.
///
/// Field names are part of the consumer contract and must stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatistics {
    /// Total observations in the window.
    pub total_records: u32,

    /// Count of healthy observations.
    pub healthy_count: u32,

    /// Count of warning observations.
    pub warning_count: u32,

    /// Count of concerning observations.
    pub concerning_count: u32,

    /// `round(healthy_count / total_records * 100)`, 0 when empty.
    pub healthy_percentage: u32,

    /// `round(warning_count / total_records * 100)`, 0 when empty.
    pub warning_percentage: u32,

    /// `round(concerning_count / total_records * 100)`, 0 when empty.
    pub concerning_percentage: u32,

    /// Observations per week, rounded to one decimal, 0 when empty.
    pub average_per_week: f64,

    /// Timestamp of the most recent observation, absent when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_analysis_date: Option<DateTime<Utc>>,
}

impl HealthStatistics {
    /// The explicit all-zero result for a pet with no observations.
    pub fn empty() -> Self {
        HealthStatistics {
            total_records: 0,
            healthy_count: 0,
            warning_count: 0,
            concerning_count: 0,
            healthy_percentage: 0,
            warning_percentage: 0,
            concerning_percentage: 0,
            average_per_week: 0.0,
            last_analysis_date: None,
        }
    }
}

/// Integer-rounded percentage of `count` against `total`; 0 when `total` is 0.
pub(crate) fn percentage(count: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((f64::from(count) / f64::from(total)) * 100.0).round() as u32
}

/// Aggregate one pet's observations over a window of `window_days` days.
pub fn aggregate(observations: &[Observation], window_days: u32) -> HealthStatistics {
    if observations.is_empty() {
        return HealthStatistics::empty();
    }

    let mut healthy = 0u32;
    let mut warning = 0u32;
    let mut concerning = 0u32;
    let mut last_seen: Option<DateTime<Utc>> = None;

    for obs in observations {
        match obs.category {
            HealthCategory::Healthy => healthy += 1,
            HealthCategory::Warning => warning += 1,
            HealthCategory::Concerning => concerning += 1,
        }
        if last_seen.map_or(true, |seen| obs.recorded_at > seen) {
            last_seen = Some(obs.recorded_at);
        }
    }

    let total = healthy + warning + concerning;
    let days = window_days.max(1);
    let per_week = (f64::from(total) / f64::from(days) * 7.0 * 10.0).round() / 10.0;

    HealthStatistics {
        total_records: total,
        healthy_count: healthy,
        warning_count: warning,
        concerning_count: concerning,
        healthy_percentage: percentage(healthy, total),
        warning_percentage: percentage(warning, total),
        concerning_percentage: percentage(concerning, total),
        average_per_week: per_week,
        last_analysis_date: last_seen,
    }
}
