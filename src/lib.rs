//! Client for the Homy listing storefront: mirrors the remote house and
//! reservation collections and uploads listing photos.

pub mod api;
pub mod config;
pub mod forms;
pub mod models;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
