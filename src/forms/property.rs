use super::{parse_date, require, ValidationErrors};
use crate::api::ImageFile;
use crate::models::{Listing, ListingStatus, PropertyType};
use chrono::NaiveDate;

/// Listing form as typed by an administrator.
///
/// Numbers and dates stay as text until the draft is turned into a
/// [`Listing`], so a rejected submission can be shown back unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDraft {
    pub title: String,
    pub address: String,
    pub description: String,
    pub price: String,
    pub surface: String,
    pub rooms: String,
    pub bathrooms: String,
    pub kind: PropertyType,
    pub status: ListingStatus,
    pub reserved_from: String,
    pub reserved_to: String,
}

/// Numbers the draft coerces into a listing
struct Figures {
    price: f64,
    surface: f64,
    rooms: u32,
    bathrooms: u32,
}

fn parse_amount(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Some(n),
        _ => {
            errors.add(field, "Must be a non-negative number");
            None
        }
    }
}

fn parse_count(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.add(field, "Must be a whole non-negative number");
            None
        }
    }
}

impl PropertyDraft {
    /// Check required fields, numbers and the reservation window.
    ///
    /// The main image lives outside the draft, so the caller says whether one
    /// was picked.
    pub fn validate(&self, has_main_image: bool) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.check(&mut errors, has_main_image);
        errors.into_result()
    }

    fn check(&self, errors: &mut ValidationErrors, has_main_image: bool) -> Option<(Figures, Option<(NaiveDate, NaiveDate)>)> {
        require(errors, "title", &self.title, "Title is required");
        require(errors, "address", &self.address, "Address is required");
        require(errors, "description", &self.description, "Description is required");

        let price = require(errors, "price", &self.price, "Price is required")
            .then(|| parse_amount(errors, "price", &self.price))
            .flatten();
        let surface = require(errors, "surface", &self.surface, "Surface is required")
            .then(|| parse_amount(errors, "surface", &self.surface))
            .flatten();
        let rooms = require(errors, "rooms", &self.rooms, "Rooms are required")
            .then(|| parse_count(errors, "rooms", &self.rooms))
            .flatten();
        let bathrooms = require(errors, "bathrooms", &self.bathrooms, "Bathrooms are required")
            .then(|| parse_count(errors, "bathrooms", &self.bathrooms))
            .flatten();

        if !has_main_image {
            errors.add("main_image", "Main image is required");
        }

        let window = if self.status == ListingStatus::Reserved {
            self.check_window(errors)
        } else {
            None
        };

        let figures = Figures {
            price: price?,
            surface: surface?,
            rooms: rooms?,
            bathrooms: bathrooms?,
        };
        Some((figures, window))
    }

    fn check_window(&self, errors: &mut ValidationErrors) -> Option<(NaiveDate, NaiveDate)> {
        let from = require(errors, "reserved_from", &self.reserved_from, "Start date is required")
            .then(|| parse_date(&self.reserved_from))
            .flatten();
        let to = require(errors, "reserved_to", &self.reserved_to, "End date is required")
            .then(|| parse_date(&self.reserved_to))
            .flatten();

        if from.is_none() {
            errors.add("reserved_from", "Invalid date");
        }
        if to.is_none() {
            errors.add("reserved_to", "Invalid date");
        }

        let (from, to) = (from?, to?);
        if from > to {
            errors.add("reserved_to", "End date must not be before start date");
            return None;
        }
        Some((from, to))
    }

    /// Build the record to submit.
    ///
    /// Reservation dates are only carried over when the listing is reserved;
    /// leftovers from an earlier edit are dropped otherwise.
    pub fn to_listing(&self, main_image: String, images: Vec<String>) -> Result<Listing, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let checked = self.check(&mut errors, !main_image.trim().is_empty());
        let (figures, window) = match checked {
            Some(checked) if errors.is_empty() => checked,
            _ => return Err(errors),
        };

        Ok(Listing {
            title: self.title.trim().to_string(),
            address: self.address.trim().to_string(),
            description: self.description.trim().to_string(),
            price: figures.price,
            surface: figures.surface,
            rooms: figures.rooms,
            bathrooms: figures.bathrooms,
            kind: self.kind.clone(),
            status: self.status,
            reserved_from: window.map(|(from, _)| from),
            reserved_to: window.map(|(_, to)| to),
            main_image,
            images,
        })
    }
}

impl From<&Listing> for PropertyDraft {
    fn from(listing: &Listing) -> Self {
        let date = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();

        Self {
            title: listing.title.clone(),
            address: listing.address.clone(),
            description: listing.description.clone(),
            price: listing.price.to_string(),
            surface: listing.surface.to_string(),
            rooms: listing.rooms.to_string(),
            bathrooms: listing.bathrooms.to_string(),
            kind: listing.kind.clone(),
            status: listing.status,
            reserved_from: date(listing.reserved_from),
            reserved_to: date(listing.reserved_to),
        }
    }
}

/// Edit session for an existing listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEdit {
    pub draft: PropertyDraft,
    /// URL currently shown as the cover
    pub main_image: String,
    pub new_main_image: Option<ImageFile>,
    /// Existing gallery URLs the user kept, in display order
    pub kept_images: Vec<String>,
    /// Files to upload and append after `kept_images`
    pub new_images: Vec<ImageFile>,
}

impl ListingEdit {
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            draft: PropertyDraft::from(listing),
            main_image: listing.main_image.clone(),
            new_main_image: None,
            kept_images: listing.images.clone(),
            new_images: Vec::new(),
        }
    }

    pub fn replace_main_image(&mut self, file: ImageFile) {
        self.new_main_image = Some(file);
    }

    /// Drop an existing gallery image. Out-of-range indexes are ignored.
    pub fn remove_image(&mut self, index: usize) {
        if index < self.kept_images.len() {
            self.kept_images.remove(index);
        }
    }

    pub fn add_images(&mut self, files: impl IntoIterator<Item = ImageFile>) {
        self.new_images.extend(files);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertyCategory;

    fn filled_draft() -> PropertyDraft {
        PropertyDraft {
            title: "Villa Amandiers".to_string(),
            address: "Route de l'Ourika, Marrakech".to_string(),
            description: "Piscine et jardin".to_string(),
            price: "1200".to_string(),
            surface: "320.5".to_string(),
            rooms: "5".to_string(),
            bathrooms: "3".to_string(),
            kind: PropertyCategory::Villa.into(),
            ..PropertyDraft::default()
        }
    }

    #[test]
    fn test_empty_draft_reports_every_required_field() {
        let errors = PropertyDraft::default().validate(false).unwrap_err();

        for field in [
            "title",
            "address",
            "description",
            "price",
            "surface",
            "rooms",
            "bathrooms",
            "main_image",
        ] {
            assert!(errors.contains(field), "missing error for {}", field);
        }
        assert!(!errors.contains("reserved_from"));
    }

    #[test]
    fn test_reserved_draft_requires_window() {
        let mut draft = filled_draft();
        draft.status = ListingStatus::Reserved;

        let errors = draft.validate(true).unwrap_err();
        assert_eq!(errors.get("reserved_from"), Some("Start date is required"));
        assert_eq!(errors.get("reserved_to"), Some("End date is required"));

        draft.reserved_from = "2024-07-10".to_string();
        draft.reserved_to = "2024-07-01".to_string();
        let errors = draft.validate(true).unwrap_err();
        assert_eq!(
            errors.get("reserved_to"),
            Some("End date must not be before start date")
        );

        draft.reserved_to = "2024-07-10".to_string();
        assert!(draft.validate(true).is_ok());
    }

    #[test]
    fn test_numbers_must_be_non_negative() {
        let mut draft = filled_draft();
        draft.price = "-5".to_string();
        draft.rooms = "two".to_string();

        let errors = draft.validate(true).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains("price"));
        assert!(errors.contains("rooms"));
    }

    #[test]
    fn test_to_listing_coerces_numbers() {
        let listing = filled_draft()
            .to_listing("https://cdn.test/main.jpg".to_string(), vec![])
            .unwrap();

        assert_eq!(listing.price, 1200.0);
        assert_eq!(listing.surface, 320.5);
        assert_eq!(listing.rooms, 5);
        assert_eq!(listing.bathrooms, 3);
        assert_eq!(listing.kind.category(), PropertyCategory::Villa);
    }

    #[test]
    fn test_available_listing_drops_reservation_dates() {
        let mut draft = filled_draft();
        draft.status = ListingStatus::Available;
        draft.reserved_from = "2024-06-01".to_string();
        draft.reserved_to = "2024-06-04".to_string();

        let listing = draft
            .to_listing("https://cdn.test/main.jpg".to_string(), vec![])
            .unwrap();

        assert_eq!(listing.reserved_from, None);
        assert_eq!(listing.reserved_to, None);
    }

    #[test]
    fn test_reserved_listing_keeps_reservation_dates() {
        let mut draft = filled_draft();
        draft.status = ListingStatus::Reserved;
        draft.reserved_from = "2024-06-01".to_string();
        draft.reserved_to = "2024-06-04".to_string();

        let listing = draft
            .to_listing("https://cdn.test/main.jpg".to_string(), vec![])
            .unwrap();

        assert_eq!(listing.reserved_from, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(listing.reserved_to, NaiveDate::from_ymd_opt(2024, 6, 4));
    }

    #[test]
    fn test_to_listing_without_main_image_fails() {
        let errors = filled_draft().to_listing(String::new(), vec![]).unwrap_err();
        assert!(errors.contains("main_image"));
    }

    #[test]
    fn test_edit_keeps_gallery_minus_removed() {
        let listing = filled_draft()
            .to_listing(
                "https://cdn.test/main.jpg".to_string(),
                vec![
                    "https://cdn.test/1.jpg".to_string(),
                    "https://cdn.test/2.jpg".to_string(),
                    "https://cdn.test/3.jpg".to_string(),
                ],
            )
            .unwrap();

        let mut edit = ListingEdit::from_listing(&listing);
        edit.remove_image(1);
        edit.remove_image(10);

        assert_eq!(
            edit.kept_images,
            vec!["https://cdn.test/1.jpg", "https://cdn.test/3.jpg"]
        );
        assert_eq!(edit.draft.price, "1200");
        assert_eq!(edit.draft.surface, "320.5");
    }
}
