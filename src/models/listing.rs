use super::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing as held by the house store, with its server id.
pub type PropertyListing = Entity<Listing>;

/// Broad kind of property a label falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyCategory {
    Apartment,
    Villa,
    House,
    Studio,
    Other,
}

impl PropertyCategory {
    /// Label used when the category is picked from the admin form
    pub fn label(&self) -> &'static str {
        match self {
            PropertyCategory::Apartment => "Apartment",
            PropertyCategory::Villa => "Villa",
            PropertyCategory::House => "House",
            PropertyCategory::Studio => "Studio",
            PropertyCategory::Other => "Other",
        }
    }
}

/// Property type label as stored by the backend.
///
/// The label is written back exactly as it was read, so listings created by
/// the French storefront keep `Appartement` / `Maison` across updates. The set
/// is open: labels that match no category are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyType(String);

impl PropertyType {
    pub fn new(label: impl Into<String>) -> Self {
        PropertyType(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn category(&self) -> PropertyCategory {
        match self.0.trim() {
            "Apartment" | "Appartement" => PropertyCategory::Apartment,
            "Villa" => PropertyCategory::Villa,
            "House" | "Maison" => PropertyCategory::House,
            "Studio" => PropertyCategory::Studio,
            _ => PropertyCategory::Other,
        }
    }
}

impl Default for PropertyType {
    fn default() -> Self {
        PropertyCategory::Apartment.into()
    }
}

impl From<PropertyCategory> for PropertyType {
    fn from(category: PropertyCategory) -> Self {
        PropertyType::new(category.label())
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Availability of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Available,
    Reserved,
}

/// Listing payload as exchanged with the collection endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub title: String,
    pub address: String,
    pub description: String,
    pub price: f64,
    pub surface: f64,
    pub rooms: u32,
    pub bathrooms: u32,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub status: ListingStatus,
    #[serde(default)]
    pub reserved_from: Option<NaiveDate>,
    #[serde(default)]
    pub reserved_to: Option<NaiveDate>,
    pub main_image: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Listing {
    pub fn is_reserved(&self) -> bool {
        self.status == ListingStatus::Reserved
    }
}
