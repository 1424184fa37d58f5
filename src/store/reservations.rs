use crate::api::CollectionApi;
use crate::forms::ReservationDraft;
use crate::models::{PropertyListing, Reservation, ReservationRequest};
use crate::store::cache::{CacheState, CollectionCache};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;

pub const RESERVATION_SENT: &str = "Reservation request sent";

/// Mirror of the remote reservation collection. Requests can be listed and
/// submitted, nothing else.
pub struct ReservationStore {
    cache: CollectionCache<Reservation>,
}

impl ReservationStore {
    pub fn new(api: Arc<dyn CollectionApi<Reservation>>) -> Self {
        Self {
            cache: CollectionCache::new("reservations", api),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CacheState<Reservation>> {
        self.cache.subscribe()
    }

    pub fn snapshot(&self) -> CacheState<Reservation> {
        self.cache.snapshot()
    }

    pub fn items(&self) -> Vec<ReservationRequest> {
        self.cache.items()
    }

    pub fn clear_status(&self) {
        self.cache.clear_status();
    }

    pub async fn fetch_all(&self) -> Result<()> {
        self.cache.fetch_all().await
    }

    /// Submit a pending request for `listing`.
    ///
    /// The listing's price is read once, here; the house store is not touched
    /// and nothing is undone if the call fails.
    pub async fn create(&self, draft: &ReservationDraft, listing: &PropertyListing) -> Result<ReservationRequest> {
        let reservation = match draft.to_reservation(listing) {
            Ok(reservation) => reservation,
            Err(errors) => return Err(self.cache.record_error(errors.into())),
        };

        self.cache.create(&reservation, RESERVATION_SENT).await
    }
}
