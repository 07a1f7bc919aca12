//! Shape classification distribution for one pet.
//!
//! Tallies the open shape vocabulary into first-appearance-ordered entries.
//! Order is deterministic given the observation order, which the service
//! guarantees by sorting fetches by timestamp.

use paw_common::ShapeClass;
use serde::{Deserialize, Serialize};

use crate::model::Observation;
use crate::stats::percentage;

/// Count and share of one shape classification value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeBucket {
    /// The shape label.
    pub shape: ShapeClass,

    /// Observations with this shape.
    pub count: u32,

    /// `round(count / total * 100)`, 0 when the pet has no observations.
    pub percentage: u32,
}

/// Tally shape classifications in first-appearance order.
pub fn shape_distribution(observations: &[Observation]) -> Vec<ShapeBucket> {
    let mut buckets: Vec<(ShapeClass, u32)> = Vec::new();
    for obs in observations {
        match buckets.iter_mut().find(|(shape, _)| *shape == obs.shape) {
            Some((_, count)) => *count += 1,
            None => buckets.push((obs.shape.clone(), 1)),
        }
    }

    let total = observations.len() as u32;
    buckets
        .into_iter()
        .map(|(shape, count)| ShapeBucket {
            shape,
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use paw_common::{HealthCategory, PetId};

    fn obs(shape: &str, minute: u32) -> Observation {
        Observation {
            pet_id: PetId::new(),
            recorded_at: Utc.with_ymd_and_hms(2026, 7, 1, 9, minute, 0).unwrap(),
            category: HealthCategory::Healthy,
            shape: ShapeClass::from(shape),
            confidence: 90,
        }
    }

    #[test]
    fn test_empty_distribution() {
        assert!(shape_distribution(&[]).is_empty());
    }

    #[test]
    fn test_first_appearance_order() {
        let observations = vec![obs("soft", 0), obs("normal", 1), obs("soft", 2), obs("hard", 3)];
        let dist = shape_distribution(&observations);
        let labels: Vec<_> = dist.iter().map(|b| b.shape.as_str()).collect();
        assert_eq!(labels, vec!["soft", "normal", "hard"]);
    }

    #[test]
    fn test_counts_and_percentages() {
        let observations = vec![obs("normal", 0), obs("normal", 1), obs("soft", 2)];
        let dist = shape_distribution(&observations);
        assert_eq!(dist[0].count, 2);
        assert_eq!(dist[0].percentage, 67);
        assert_eq!(dist[1].count, 1);
        assert_eq!(dist[1].percentage, 33);
        assert_eq!(dist.iter().map(|b| b.count).sum::<u32>(), 3);
    }

    #[test]
    fn test_deterministic_given_same_order() {
        let observations = vec![obs("a", 0), obs("b", 1), obs("a", 2)];
        assert_eq!(
            shape_distribution(&observations),
            shape_distribution(&observations)
        );
    }
}
