//! Cross-pet comparison summary.
//!
//! Picks the extremal pets and computes the pooled average over all
//! compared observations. Ties resolve to the first-encountered pet in
//! input order; the selection iterates with strict `>` replacement and
//! never sorts, so equal values cannot reorder.

use serde::{Deserialize, Serialize};

use paw_common::PetId;

use crate::model::{AnalysisWindow, PetProfile};
use crate::stats::{percentage, HealthStatistics};

/// One pet's profile and statistics, borrowed for cross-pet passes.
#[derive(Debug, Clone, Copy)]
pub struct PetHealth<'a> {
    /// The pet's read-only profile.
    pub profile: &'a PetProfile,

    /// The pet's aggregated statistics.
    pub stats: &'a HealthStatistics,
}

/// The pet with the highest share of healthy observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthiestPet {
    /// Pet identifier.
    pub pet_id: PetId,

    /// Display name.
    pub pet_name: String,

    /// The winning healthy percentage.
    pub healthy_percentage: u32,
}

/// The pet with the highest share of concerning observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostConcerningPet {
    /// Pet identifier.
    pub pet_id: PetId,

    /// Display name.
    pub pet_name: String,

    /// The winning concerning percentage.
    pub concerning_percentage: u32,
}

/// Cross-pet summary of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    /// Pet with the maximum healthy percentage (first wins ties).
    pub healthiest_pet: HealthiestPet,

    /// Pet with the maximum concerning percentage (first wins ties).
    pub most_concerning_pet: MostConcerningPet,

    /// Pooled ratio `round(sum(healthy) / sum(total) * 100)`, 0 when no
    /// observations exist. Not the mean of per-pet percentages.
    pub average_health_percentage: u32,

    /// Sum of all pets' total records.
    pub total_records_compared: u32,

    /// The window the comparison covered.
    pub window: AnalysisWindow,
}

/// Summarize the compared set. Returns `None` for an empty input, which the
/// service has already rejected during validation.
pub fn summarize(pets: &[PetHealth<'_>], window: AnalysisWindow) -> Option<ComparisonSummary> {
    let first = pets.first()?;

    let mut healthiest = first;
    let mut most_concerning = first;
    let mut pooled_healthy = 0u32;
    let mut pooled_total = 0u32;

    for pet in pets {
        if pet.stats.healthy_percentage > healthiest.stats.healthy_percentage {
            healthiest = pet;
        }
        if pet.stats.concerning_percentage > most_concerning.stats.concerning_percentage {
            most_concerning = pet;
        }
        pooled_healthy += pet.stats.healthy_count;
        pooled_total += pet.stats.total_records;
    }

    Some(ComparisonSummary {
        healthiest_pet: HealthiestPet {
            pet_id: healthiest.profile.id,
            pet_name: healthiest.profile.name.clone(),
            healthy_percentage: healthiest.stats.healthy_percentage,
        },
        most_concerning_pet: MostConcerningPet {
            pet_id: most_concerning.profile.id,
            pet_name: most_concerning.profile.name.clone(),
            concerning_percentage: most_concerning.stats.concerning_percentage,
        },
        average_health_percentage: percentage(pooled_healthy, pooled_total),
        total_records_compared: pooled_total,
        window,
    })
}
