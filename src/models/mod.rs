pub mod listing;
pub mod reservation;

pub use listing::{Listing, ListingStatus, PropertyCategory, PropertyListing, PropertyType};
pub use reservation::{Reservation, ReservationRequest, ReservationStatus};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier.
///
/// Backends hand out either integers or strings, so the id is kept opaque and
/// only ever compared for equality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl EntityId {
    /// Compare against a textual key such as a route parameter, where `7` and
    /// `"7"` name the same record.
    pub fn matches_key(&self, key: &str) -> bool {
        match self {
            EntityId::Int(n) => n.to_string() == key,
            EntityId::Text(s) => s == key,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Int(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

/// A record as stored by the remote collection: the payload plus its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity<T> {
    pub id: EntityId,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Entity<T> {
    pub fn new(id: impl Into<EntityId>, data: T) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}
