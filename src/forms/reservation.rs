use super::{parse_date, require, ValidationErrors};
use crate::models::{PropertyListing, Reservation, ReservationStatus};
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_GUESTS: &str = "1 Adult";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

/// Checkout form for a stay request
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationDraft {
    pub from: String,
    pub to: String,
    pub guests: String,
    pub full_name: String,
    pub email: String,
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self {
            from: String::new(),
            to: String::new(),
            guests: DEFAULT_GUESTS.to_string(),
            full_name: String::new(),
            email: String::new(),
        }
    }
}

impl ReservationDraft {
    /// Whole nights between arrival and departure, 0 while the range is
    /// incomplete or inverted
    pub fn nights(&self) -> i64 {
        match (parse_date(&self.from), parse_date(&self.to)) {
            (Some(from), Some(to)) => (to - from).num_days().max(0),
            _ => 0,
        }
    }

    pub fn total(&self, nightly_price: f64) -> f64 {
        self.nights() as f64 * nightly_price
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let from = require(&mut errors, "from", &self.from, "Arrival date is required")
            .then(|| parse_date(&self.from))
            .flatten();
        let to = require(&mut errors, "to", &self.to, "Departure date is required")
            .then(|| parse_date(&self.to))
            .flatten();
        if from.is_none() {
            errors.add("from", "Invalid date");
        }
        if to.is_none() {
            errors.add("to", "Invalid date");
        }
        if let (Some(from), Some(to)) = (from, to) {
            if from >= to {
                errors.add("to", "Departure must be at least one night after arrival");
            }
        }

        require(&mut errors, "full_name", &self.full_name, "Full name is required");
        if require(&mut errors, "email", &self.email, "Email is required")
            && !email_pattern().is_match(self.email.trim())
        {
            errors.add("email", "Invalid email");
        }

        errors.into_result()
    }

    /// Build a pending request for `listing`, freezing its current price
    /// into the total
    pub fn to_reservation(&self, listing: &PropertyListing) -> Result<Reservation, ValidationErrors> {
        self.validate()?;

        let (from, to) = match (parse_date(&self.from), parse_date(&self.to)) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("from", "Invalid date");
                return Err(errors);
            }
        };
        let nights = self.nights();

        Ok(Reservation {
            house_id: listing.id.clone(),
            from,
            to,
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            guests: self.guests.clone(),
            nights,
            total: nights as f64 * listing.data.price,
            status: ReservationStatus::Pending,
        })
    }
}
