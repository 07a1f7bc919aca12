//! Pet and owner identity types.
//!
//! These types ensure requests cannot mix up pet and owner identifiers.
//! Both wrap a UUID assigned by the record store at creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a tracked pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(pub Uuid);

impl PetId {
    /// Generate a fresh pet identifier.
    pub fn new() -> Self {
        PetId(Uuid::new_v4())
    }

    /// Parse and validate a pet identifier string.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(PetId)
    }
}

impl Default for PetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PetId {
    fn from(id: Uuid) -> Self {
        PetId(id)
    }
}

/// Identifier of a pet owner (the calling user).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub Uuid);

impl OwnerId {
    /// Generate a fresh owner identifier.
    pub fn new() -> Self {
        OwnerId(Uuid::new_v4())
    }

    /// Parse and validate an owner identifier string.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(OwnerId)
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OwnerId {
    fn from(id: Uuid) -> Self {
        OwnerId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pet_id_parse_valid() {
        let id = PetId::new();
        let parsed = PetId::parse(&id.to_string()).expect("round-trip parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_pet_id_parse_rejects_garbage() {
        assert!(PetId::parse("not-a-uuid").is_none());
        assert!(PetId::parse("").is_none());
        assert!(PetId::parse("1234").is_none());
    }

    #[test]
    fn test_owner_id_parse() {
        let id = OwnerId::new();
        assert_eq!(OwnerId::parse(&id.to_string()), Some(id));
        assert!(OwnerId::parse("xyz").is_none());
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = PetId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let back: PetId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
