//! Colleague records.
//!
//! A `Colleague` is a person with a name, a photo, and an ordered list of
//! free-text descriptions. Records are owned by the store; the game and the
//! editor work on fetched copies and never mutate a record in place.

use serde::{Deserialize, Serialize};

/// Unique identifier for a colleague, assigned by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColleagueId(pub i64);

impl ColleagueId {
    /// Create a colleague ID from a raw store value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ColleagueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Colleague({})", self.0)
    }
}

/// A colleague record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colleague {
    pub id: ColleagueId,

    pub name: String,

    /// Data URI or URL. Empty when no photo was uploaded.
    #[serde(default)]
    pub photo: String,

    /// Ordered free-text descriptions. Always a list; malformed stored
    /// values are coerced to empty at the storage boundary.
    #[serde(default)]
    pub descriptions: Vec<String>,
}

/// Caller-supplied fields for creating or fully replacing a record.
///
/// The id is absent: the store assigns it on create, and updates address it
/// separately.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColleagueDraft {
    pub name: String,

    #[serde(default)]
    pub photo: String,

    #[serde(default)]
    pub descriptions: Vec<String>,
}
