//! In-memory collaborators for integration tests.
//!
//! Stand-ins for the observation store and the ownership subsystem, with a
//! switch to simulate a store outage for atomicity tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use paw_common::{Error, HealthCategory, OwnerId, PetId, Result, ShapeClass};
use paw_core::model::{AnalysisWindow, Observation, PetProfile};
use paw_core::source::{ObservationSource, OwnershipGate};

/// Fixed "now" for deterministic windows.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
}

/// In-memory pet platform backing both collaborator traits.
#[derive(Default)]
pub struct MemoryPlatform {
    pets: Vec<(OwnerId, PetProfile)>,
    observations: Vec<Observation>,
    fail_fetch_for: Option<PetId>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pet(&mut self, owner: OwnerId, profile: PetProfile) {
        self.pets.push((owner, profile));
    }

    pub fn add_observation(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    /// Make fetches for the given pet fail, as if the store dropped out
    /// mid-operation.
    pub fn fail_fetch_for(&mut self, pet_id: PetId) {
        self.fail_fetch_for = Some(pet_id);
    }
}

impl ObservationSource for &MemoryPlatform {
    fn fetch_observations(
        &self,
        pet_id: &PetId,
        window: &AnalysisWindow,
    ) -> Result<Vec<Observation>> {
        if self.fail_fetch_for.as_ref() == Some(pet_id) {
            return Err(Error::StoreUnavailable("connection reset".to_string()));
        }
        let mut matching: Vec<Observation> = self
            .observations
            .iter()
            .filter(|o| o.pet_id == *pet_id)
            .filter(|o| o.recorded_at >= window.start && o.recorded_at <= window.end)
            .cloned()
            .collect();
        matching.sort_by_key(|o| o.recorded_at);
        Ok(matching)
    }
}

impl OwnershipGate for &MemoryPlatform {
    fn resolve_owned(&self, owner: &OwnerId, pet_ids: &[PetId]) -> Result<Vec<PetProfile>> {
        // Insertion order on purpose: the service must re-key into request
        // order itself.
        Ok(self
            .pets
            .iter()
            .filter(|(o, p)| o == owner && pet_ids.contains(&p.id))
            .map(|(_, p)| p.clone())
            .collect())
    }
}

/// A profile with only the fields every test needs.
pub fn profile(name: &str) -> PetProfile {
    PetProfile {
        id: PetId::new(),
        name: name.to_string(),
        species: "dog".to_string(),
        breed: None,
        age_months: None,
        weight_kg: None,
        avatar_url: None,
    }
}

/// An observation `days_ago` days before [`now`], on the hour.
pub fn observation(
    pet_id: PetId,
    days_ago: i64,
    category: HealthCategory,
    shape: &str,
) -> Observation {
    Observation {
        pet_id,
        recorded_at: now() - Duration::days(days_ago),
        category,
        shape: ShapeClass::from(shape),
        confidence: 90,
    }
}
