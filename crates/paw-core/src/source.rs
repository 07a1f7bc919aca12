//! Collaborator contracts consumed by the engine.
//!
//! The record store and the ownership/authorization subsystem live outside
//! this crate; the engine sees them only through these two traits. Both are
//! synchronous: the cardinality limit keeps per-call fan-out at five fetches,
//! and any parallelism or timeout policy belongs to the implementations.

use paw_common::{OwnerId, PetId, Result};

use crate::model::{AnalysisWindow, Observation, PetProfile};

/// Time-ranged read access to immutable per-pet observations.
pub trait ObservationSource {
    /// Fetch one pet's observations inside the window.
    ///
    /// Implementations should return observations sorted ascending by
    /// timestamp; the engine re-sorts defensively either way. Store
    /// unavailability is reported as an error, never as an empty result.
    fn fetch_observations(&self, pet_id: &PetId, window: &AnalysisWindow)
        -> Result<Vec<Observation>>;
}

/// Ownership and liveness resolution for requested pets.
pub trait OwnershipGate {
    /// Resolve the requested ids to active pets owned by the caller.
    ///
    /// Returns exactly the active, owned profiles. A returned set smaller
    /// than the request signals a not-found/authorization condition, which
    /// the engine rejects before computing anything.
    fn resolve_owned(&self, owner: &OwnerId, pet_ids: &[PetId]) -> Result<Vec<PetProfile>>;
}
