//! Daily trend series for one pet, and trend direction classification.
//!
//! Observations are bucketed by UTC calendar day. The `BTreeMap` keyed on
//! [`NaiveDate`] makes ascending date order structural rather than a
//! post-sort, and the same key is used for every pet in a comparison so
//! cross-pet alignment by date is valid.

use chrono::NaiveDate;
use paw_common::HealthCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{AnalysisWindow, Observation};
use crate::stats::percentage;

/// Trailing/preceding window length for direction classification, in days.
pub const TREND_WINDOW_DAYS: usize = 7;

/// Mean-health-percentage shift that counts as a direction change.
pub const TREND_SHIFT_THRESHOLD: f64 = 5.0;

/// One calendar day of category counts for one pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrendPoint {
    /// UTC calendar day.
    pub date: NaiveDate,

    /// Healthy observations that day.
    pub healthy: u32,

    /// Warning observations that day.
    pub warning: u32,

    /// Concerning observations that day.
    pub concerning: u32,

    /// Sum of the three category counts.
    pub total: u32,
}

/// Category counts for one day, before a total is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct DayTally {
    pub healthy: u32,
    pub warning: u32,
    pub concerning: u32,
}

impl DayTally {
    pub(crate) fn add(&mut self, category: HealthCategory) {
        match category {
            HealthCategory::Healthy => self.healthy += 1,
            HealthCategory::Warning => self.warning += 1,
            HealthCategory::Concerning => self.concerning += 1,
        }
    }

    pub(crate) fn total(&self) -> u32 {
        self.healthy + self.warning + self.concerning
    }

    pub(crate) fn health_percentage(&self) -> u32 {
        percentage(self.healthy, self.total())
    }
}

/// Bucket one pet's observations by UTC calendar day, ascending.
pub(crate) fn daily_tallies(observations: &[Observation]) -> BTreeMap<NaiveDate, DayTally> {
    let mut days: BTreeMap<NaiveDate, DayTally> = BTreeMap::new();
    for obs in observations {
        days.entry(AnalysisWindow::day_key(obs.recorded_at))
            .or_default()
            .add(obs.category);
    }
    days
}

/// Build the ordered daily trend series for one pet.
///
/// One point per calendar day that has data, ascending by date; each point's
/// `total` equals the sum of its category counts.
pub fn daily_trend(observations: &[Observation]) -> Vec<DailyTrendPoint> {
    daily_tallies(observations)
        .into_iter()
        .map(|(date, tally)| DailyTrendPoint {
            date,
            healthy: tally.healthy,
            warning: tally.warning,
            concerning: tally.concerning,
            total: tally.total(),
        })
        .collect()
}

/// Coarse direction of a health trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Improving => write!(f, "improving"),
            TrendDirection::Stable => write!(f, "stable"),
            TrendDirection::Declining => write!(f, "declining"),
        }
    }
}

/// Classify a date-ordered series of daily mean health percentages.
///
/// Compares the trailing seven values against the preceding seven. A shift
/// above +5 is improving, below -5 declining, anything else stable. Fewer
/// than fourteen grouped days classify as stable.
pub fn classify_direction(daily_means: &[f64]) -> TrendDirection {
    if daily_means.len() < 2 * TREND_WINDOW_DAYS {
        return TrendDirection::Stable;
    }

    let trailing_start = daily_means.len() - TREND_WINDOW_DAYS;
    let preceding_start = daily_means.len() - 2 * TREND_WINDOW_DAYS;

    let trailing: f64 =
        daily_means[trailing_start..].iter().sum::<f64>() / TREND_WINDOW_DAYS as f64;
    let preceding: f64 = daily_means[preceding_start..trailing_start].iter().sum::<f64>()
        / TREND_WINDOW_DAYS as f64;

    let shift = trailing - preceding;
    if shift > TREND_SHIFT_THRESHOLD {
        TrendDirection::Improving
    } else if shift < -TREND_SHIFT_THRESHOLD {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use paw_common::{PetId, ShapeClass};

    fn obs(category: HealthCategory, day: u32, hour: u32) -> Observation {
        Observation {
            pet_id: PetId::new(),
            recorded_at: Utc.with_ymd_and_hms(2026, 7, day, hour, 0, 0).unwrap(),
            category,
            shape: ShapeClass::from("normal"),
            confidence: 90,
        }
    }

    #[test]
    fn test_empty_trend() {
        assert!(daily_trend(&[]).is_empty());
    }

    #[test]
    fn test_trend_groups_by_day_ascending() {
        // Days 3, 1, 1, 2 out of order; output must be 1, 2, 3.
        let observations = vec![
            obs(HealthCategory::Healthy, 3, 8),
            obs(HealthCategory::Warning, 1, 9),
            obs(HealthCategory::Healthy, 1, 20),
            obs(HealthCategory::Concerning, 2, 7),
        ];
        let trend = daily_trend(&observations);
        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        assert_eq!(trend[1].date, NaiveDate::from_ymd_opt(2026, 7, 2).unwrap());
        assert_eq!(trend[2].date, NaiveDate::from_ymd_opt(2026, 7, 3).unwrap());

        assert_eq!(trend[0].healthy, 1);
        assert_eq!(trend[0].warning, 1);
        assert_eq!(trend[0].total, 2);
    }

    #[test]
    fn test_point_total_equals_category_sum() {
        let observations = vec![
            obs(HealthCategory::Healthy, 5, 8),
            obs(HealthCategory::Healthy, 5, 9),
            obs(HealthCategory::Concerning, 5, 10),
        ];
        let trend = daily_trend(&observations);
        assert_eq!(trend.len(), 1);
        let point = &trend[0];
        assert_eq!(point.total, point.healthy + point.warning + point.concerning);
        assert_eq!(point.total, 3);
    }

    #[test]
    fn test_day_tally_health_percentage() {
        let mut tally = DayTally::default();
        tally.add(HealthCategory::Healthy);
        tally.add(HealthCategory::Healthy);
        tally.add(HealthCategory::Warning);
        assert_eq!(tally.health_percentage(), 67);
        assert_eq!(DayTally::default().health_percentage(), 0);
    }

    #[test]
    fn test_classify_short_series_is_stable() {
        let means = vec![50.0; 13];
        assert_eq!(classify_direction(&means), TrendDirection::Stable);
        assert_eq!(classify_direction(&[]), TrendDirection::Stable);
    }

    #[test]
    fn test_classify_improving() {
        let mut means = vec![50.0; 7];
        means.extend(vec![60.0; 7]);
        assert_eq!(classify_direction(&means), TrendDirection::Improving);
    }

    #[test]
    fn test_classify_declining() {
        let mut means = vec![80.0; 7];
        means.extend(vec![60.0; 7]);
        assert_eq!(classify_direction(&means), TrendDirection::Declining);
    }

    #[test]
    fn test_classify_within_threshold_is_stable() {
        // Shift of exactly +5 is not above the threshold.
        let mut means = vec![50.0; 7];
        means.extend(vec![55.0; 7]);
        assert_eq!(classify_direction(&means), TrendDirection::Stable);
    }

    #[test]
    fn test_classify_uses_last_two_windows_only() {
        // Ancient history should not matter; only the last 14 values do.
        let mut means = vec![10.0; 20];
        means.extend(vec![50.0; 7]);
        means.extend(vec![70.0; 7]);
        assert_eq!(classify_direction(&means), TrendDirection::Improving);
    }

    #[test]
    fn test_direction_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&TrendDirection::Improving).unwrap(),
            "\"improving\""
        );
    }
}
