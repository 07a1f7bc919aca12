//! Comparison orchestrator.
//!
//! Validates the request, resolves ownership, fetches per-pet observations,
//! runs the per-pet reducers and the cross-pet rule engines, and assembles
//! the composite results. The whole multi-pet fetch is one unit: any
//! ownership or fetch failure rejects the entire call, so a partial
//! comparison is never returned. Nothing is persisted; two calls against an
//! unchanged store return identical results.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use paw_common::{Error, OwnerId, PetId, Result};

use crate::config::{
    EngineConfig, MAX_COMPARE_PETS, MAX_WINDOW_DAYS, MIN_COMPARE_DAYS, MIN_COMPARE_PETS,
    MIN_TREND_DAYS,
};
use crate::distribution::{shape_distribution, ShapeBucket};
use crate::insight::generate_insights;
use crate::model::{AnalysisWindow, Observation, PetProfile};
use crate::recommend::generate_recommendations;
use crate::source::{ObservationSource, OwnershipGate};
use crate::stats::{aggregate, HealthStatistics};
use crate::summary::{summarize, ComparisonSummary, PetHealth};
use crate::trend::{classify_direction, daily_tallies, daily_trend, DailyTrendPoint, TrendDirection};

/// One pet's slice of a full comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetComparison {
    /// The pet's profile.
    pub profile: PetProfile,

    /// Aggregated statistics over the window.
    pub statistics: HealthStatistics,

    /// Daily trend series, ascending by date.
    pub trend: Vec<DailyTrendPoint>,

    /// Shape classification distribution, first-appearance order.
    pub shape_distribution: Vec<ShapeBucket>,
}

/// Composite result of a full comparison. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Per-pet results in request order.
    pub pets: Vec<PetComparison>,

    /// Cross-pet summary.
    pub summary: ComparisonSummary,

    /// Insight strings in rule order.
    pub insights: Vec<String>,

    /// Recommendation strings in rule order.
    pub recommendations: Vec<String>,
}

/// One pet's counts on one trend date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPetEntry {
    /// Pet identifier.
    pub pet_id: PetId,

    /// Display name.
    pub pet_name: String,

    /// Healthy observations that day (0 when the pet has no data).
    pub healthy: u32,

    /// Warning observations that day.
    pub warning: u32,

    /// Concerning observations that day.
    pub concerning: u32,

    /// Sum of the three counts.
    pub total: u32,

    /// `round(healthy / total * 100)`, 0 when the pet has no data that day.
    pub health_percentage: u32,
}

/// All pets' counts on one date of the merged trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendDatePoint {
    /// UTC calendar day.
    pub date: NaiveDate,

    /// One entry per compared pet, in request order.
    pub pets: Vec<TrendPetEntry>,
}

/// Summary of a trend comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    /// Number of distinct dates with data.
    pub total_days: usize,

    /// Number of compared pets.
    pub pets_compared: usize,

    /// Coarse direction of the combined health trend.
    pub average_health_trend: TrendDirection,
}

/// Date-aligned trend view across all compared pets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendComparison {
    /// Every date present in any pet's data, exactly once, ascending.
    pub trends: Vec<TrendDatePoint>,

    /// Trend summary.
    pub summary: TrendSummary,
}

/// Parse raw pet id strings from the request boundary.
pub fn parse_pet_ids<S: AsRef<str>>(raw: &[S]) -> Result<Vec<PetId>> {
    raw.iter()
        .map(|s| {
            PetId::parse(s.as_ref()).ok_or_else(|| Error::MalformedPetId(s.as_ref().to_string()))
        })
        .collect()
}

/// The comparison engine, generic over its two collaborators.
#[derive(Debug)]
pub struct ComparisonService<S, G> {
    source: S,
    gate: G,
    config: EngineConfig,
}

impl<S, G> ComparisonService<S, G>
where
    S: ObservationSource,
    G: OwnershipGate,
{
    /// Create a service with the default configuration.
    pub fn new(source: S, gate: G) -> Self {
        ComparisonService {
            source,
            gate,
            config: EngineConfig::default(),
        }
    }

    /// Create a service with an explicit, validated configuration.
    pub fn with_config(source: S, gate: G, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(ComparisonService {
            source,
            gate,
            config,
        })
    }

    /// Compare 2-5 pets over a trailing window ending now.
    ///
    /// `days` defaults to the configured window when omitted.
    pub fn compare_pets(
        &self,
        owner: &OwnerId,
        pet_ids: &[PetId],
        days: Option<u32>,
    ) -> Result<ComparisonResult> {
        self.compare_pets_at(owner, pet_ids, days, Utc::now())
    }

    /// [`Self::compare_pets`] with an explicit window end, for deterministic
    /// callers and tests.
    pub fn compare_pets_at(
        &self,
        owner: &OwnerId,
        pet_ids: &[PetId],
        days: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<ComparisonResult> {
        let days = days.unwrap_or(self.config.default_window_days);
        validate_cardinality(pet_ids.len(), Some(MAX_COMPARE_PETS))?;
        validate_days(days, MIN_COMPARE_DAYS)?;

        debug!(%owner, pets = pet_ids.len(), days, "starting pet comparison");

        let profiles = self.resolve_in_request_order(owner, pet_ids)?;
        let window = AnalysisWindow::trailing(now, days);

        let mut pets = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let observations = self.fetch_sorted(&profile.id, &window)?;
            pets.push(PetComparison {
                statistics: aggregate(&observations, window.days),
                trend: daily_trend(&observations),
                shape_distribution: shape_distribution(&observations),
                profile,
            });
        }

        let compared: Vec<PetHealth<'_>> = pets
            .iter()
            .map(|p| PetHealth {
                profile: &p.profile,
                stats: &p.statistics,
            })
            .collect();

        let summary = summarize(&compared, window).ok_or(Error::TooFewPets {
            count: 0,
            min: MIN_COMPARE_PETS,
        })?;
        let insights = generate_insights(&compared);
        let recommendations = generate_recommendations(&compared);

        info!(
            pets = pets.len(),
            total_records = summary.total_records_compared,
            insights = insights.len(),
            recommendations = recommendations.len(),
            "comparison complete"
        );

        Ok(ComparisonResult {
            pets,
            summary,
            insights,
            recommendations,
        })
    }

    /// Date-aligned trend comparison for 2 or more pets.
    ///
    /// `days` defaults to the configured window when omitted.
    pub fn compare_trends(
        &self,
        owner: &OwnerId,
        pet_ids: &[PetId],
        days: Option<u32>,
    ) -> Result<TrendComparison> {
        self.compare_trends_at(owner, pet_ids, days, Utc::now())
    }

    /// [`Self::compare_trends`] with an explicit window end.
    pub fn compare_trends_at(
        &self,
        owner: &OwnerId,
        pet_ids: &[PetId],
        days: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<TrendComparison> {
        let days = days.unwrap_or(self.config.default_window_days);
        validate_cardinality(pet_ids.len(), None)?;
        validate_days(days, MIN_TREND_DAYS)?;

        debug!(%owner, pets = pet_ids.len(), days, "starting trend comparison");

        let profiles = self.resolve_in_request_order(owner, pet_ids)?;
        let window = AnalysisWindow::trailing(now, days);

        let mut per_pet = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let observations = self.fetch_sorted(&profile.id, &window)?;
            per_pet.push((profile, daily_tallies(&observations)));
        }

        // Every date any pet logged appears exactly once, ascending.
        let dates: BTreeSet<NaiveDate> = per_pet
            .iter()
            .flat_map(|(_, tallies)| tallies.keys().copied())
            .collect();

        let mut trends = Vec::with_capacity(dates.len());
        let mut daily_means = Vec::with_capacity(dates.len());
        for date in dates {
            let pets: Vec<TrendPetEntry> = per_pet
                .iter()
                .map(|(profile, tallies)| trend_entry(profile, tallies, date))
                .collect();

            // A pet without data that day says nothing about its health, so
            // the day's mean covers only pets that logged something.
            let with_data: Vec<f64> = pets
                .iter()
                .filter(|p| p.total > 0)
                .map(|p| f64::from(p.health_percentage))
                .collect();
            if !with_data.is_empty() {
                daily_means.push(with_data.iter().sum::<f64>() / with_data.len() as f64);
            }

            trends.push(TrendDatePoint { date, pets });
        }

        let summary = TrendSummary {
            total_days: trends.len(),
            pets_compared: per_pet.len(),
            average_health_trend: classify_direction(&daily_means),
        };

        info!(
            pets = summary.pets_compared,
            days = summary.total_days,
            direction = %summary.average_health_trend,
            "trend comparison complete"
        );

        Ok(TrendComparison { trends, summary })
    }

    /// Resolve ownership and re-key the profiles into request order.
    ///
    /// The gate's return order is not part of its contract; output order must
    /// be input order, so the service reorders. A missing or duplicated id
    /// surfaces as the authorization error.
    fn resolve_in_request_order(
        &self,
        owner: &OwnerId,
        pet_ids: &[PetId],
    ) -> Result<Vec<PetProfile>> {
        let resolved = self.gate.resolve_owned(owner, pet_ids)?;
        if resolved.len() != pet_ids.len() {
            warn!(
                requested = pet_ids.len(),
                resolved = resolved.len(),
                "ownership check did not resolve all pets"
            );
            return Err(Error::PetsUnresolved {
                requested: pet_ids.len(),
                resolved: resolved.len(),
            });
        }

        let mut ordered = Vec::with_capacity(pet_ids.len());
        for id in pet_ids {
            match resolved.iter().find(|p| p.id == *id) {
                Some(profile) => ordered.push(profile.clone()),
                None => {
                    return Err(Error::PetsUnresolved {
                        requested: pet_ids.len(),
                        resolved: resolved.len(),
                    })
                }
            }
        }
        Ok(ordered)
    }

    /// Fetch one pet's observations and re-sort defensively.
    ///
    /// The stable sort keeps equal-timestamp observations in source order,
    /// so the distribution's first-appearance ordering stays deterministic.
    fn fetch_sorted(&self, pet_id: &PetId, window: &AnalysisWindow) -> Result<Vec<Observation>> {
        let mut observations = self
            .source
            .fetch_observations(pet_id, window)
            .map_err(|err| {
                warn!(pet = %pet_id, error = %err, "observation fetch failed, aborting comparison");
                err
            })?;
        observations.sort_by_key(|o| o.recorded_at);
        debug!(pet = %pet_id, count = observations.len(), "fetched observations");
        Ok(observations)
    }
}

fn trend_entry(
    profile: &PetProfile,
    tallies: &BTreeMap<NaiveDate, crate::trend::DayTally>,
    date: NaiveDate,
) -> TrendPetEntry {
    match tallies.get(&date) {
        Some(tally) => TrendPetEntry {
            pet_id: profile.id,
            pet_name: profile.name.clone(),
            healthy: tally.healthy,
            warning: tally.warning,
            concerning: tally.concerning,
            total: tally.total(),
            health_percentage: tally.health_percentage(),
        },
        None => TrendPetEntry {
            pet_id: profile.id,
            pet_name: profile.name.clone(),
            healthy: 0,
            warning: 0,
            concerning: 0,
            total: 0,
            health_percentage: 0,
        },
    }
}

fn validate_cardinality(count: usize, max: Option<usize>) -> Result<()> {
    if count < MIN_COMPARE_PETS {
        return Err(Error::TooFewPets {
            count,
            min: MIN_COMPARE_PETS,
        });
    }
    if let Some(max) = max {
        if count > max {
            return Err(Error::TooManyPets { count, max });
        }
    }
    Ok(())
}

fn validate_days(days: u32, min: u32) -> Result<()> {
    if days < min || days > MAX_WINDOW_DAYS {
        return Err(Error::WindowOutOfRange {
            days,
            min,
            max: MAX_WINDOW_DAYS,
        });
    }
    Ok(())
}
