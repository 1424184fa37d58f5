use super::{Entity, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reservation as held by the reservation store, with its server id.
pub type ReservationRequest = Entity<Reservation>;

/// Lifecycle of a reservation request.
///
/// The client only ever creates `Pending` requests; the other states come from
/// the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Rejected,
}

/// Reservation payload as exchanged with the collection endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    /// Listing this request is for. Not cleaned up if the listing goes away.
    pub house_id: EntityId,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub full_name: String,
    pub email: String,
    pub guests: String,
    #[serde(default)]
    pub nights: i64,
    /// Price snapshot taken at submission.
    pub total: f64,
    #[serde(default)]
    pub status: ReservationStatus,
}
