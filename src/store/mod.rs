//! In-memory mirrors of the remote collections.
//!
//! A store never edits its list on its own: every change is the result of a
//! settled remote call, applied through one of the rules in [`reconcile`].

pub mod cache;
pub mod filter;
pub mod houses;
pub mod reconcile;
pub mod reservations;
pub mod uploads;

pub use cache::{CacheState, CollectionCache};
pub use filter::ListingFilter;
pub use houses::HouseStore;
pub use reservations::ReservationStore;
