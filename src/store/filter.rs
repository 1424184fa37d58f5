use crate::models::{Listing, ListingStatus};

/// Catalogue search as offered on the storefront and the admin dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    /// Matched case-insensitively against title or address
    pub search: String,
    pub status: Option<ListingStatus>,
    /// Matched case-insensitively against the address
    pub city: Option<String>,
}

impl ListingFilter {
    pub fn matches(&self, listing: &Listing) -> bool {
        let title = listing.title.to_lowercase();
        let address = listing.address.to_lowercase();

        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty() || title.contains(&search) || address.contains(&search);

        let matches_status = self.status.map_or(true, |status| listing.status == status);

        let matches_city = self
            .city
            .as_deref()
            .map(|city| city.trim().to_lowercase())
            .map_or(true, |city| address.contains(&city));

        matches_search && matches_status && matches_city
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_listing;

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(ListingFilter::default().matches(&sample_listing(1, "Riad Jasmin").data));
    }

    #[test]
    fn test_search_is_case_insensitive_on_title_or_address() {
        let listing = sample_listing(1, "Riad Jasmin").data;

        let by_title = ListingFilter {
            search: "jasMIN".to_string(),
            ..ListingFilter::default()
        };
        let by_address = ListingFilter {
            search: "MARRAKECH".to_string(),
            ..ListingFilter::default()
        };
        let miss = ListingFilter {
            search: "tanger".to_string(),
            ..ListingFilter::default()
        };

        assert!(by_title.matches(&listing));
        assert!(by_address.matches(&listing));
        assert!(!miss.matches(&listing));
    }

    #[test]
    fn test_status_and_city_narrow_results() {
        let mut listing = sample_listing(1, "Riad Jasmin").data;
        listing.status = ListingStatus::Reserved;

        let reserved_in_marrakech = ListingFilter {
            status: Some(ListingStatus::Reserved),
            city: Some("marrakech".to_string()),
            ..ListingFilter::default()
        };
        let available = ListingFilter {
            status: Some(ListingStatus::Available),
            ..ListingFilter::default()
        };
        let rabat = ListingFilter {
            city: Some("Rabat".to_string()),
            ..ListingFilter::default()
        };

        assert!(reserved_in_marrakech.matches(&listing));
        assert!(!available.matches(&listing));
        assert!(!rabat.matches(&listing));
    }
}
