//! Lodging discovery for the trip destination.

use tracing::debug;

use super::client::{PlacesApi, VENUE_FIELD_MASK};
use super::types::{Lodging, PlaceRecord, PlacesError, UNKNOWN_HOSTEL_NAME};

pub const DEFAULT_HOSTEL_COUNT: u32 = 3;

pub struct HostelFinder<P> {
    api: P,
    max_results: u32,
}

impl<P: PlacesApi> HostelFinder<P> {
    pub fn new(api: P, max_results: u32) -> Self {
        Self { api, max_results }
    }

    /// Find hostels, student accommodation or hotels in `city, country`.
    /// Prices are left empty for the estimator.
    pub fn find(&self, city: &str, country: &str) -> Result<Vec<Lodging>, PlacesError> {
        let query = hostel_query(city, country);
        let records = self
            .api
            .search_text(&query, VENUE_FIELD_MASK, Some(self.max_results))?;
        debug!(city, country, found = records.len(), "hostel search");
        Ok(records.iter().map(|r| self.to_lodging(r)).collect())
    }

    fn to_lodging(&self, record: &PlaceRecord) -> Lodging {
        Lodging {
            name: record.display_text().unwrap_or(UNKNOWN_HOSTEL_NAME).to_string(),
            rating: record.rating,
            photo_url: record
                .first_photo()
                .map(|p| self.api.photo_url(p))
                .unwrap_or_default(),
            price: String::new(),
        }
    }
}

pub fn hostel_query(city: &str, country: &str) -> String {
    format!("hostel, student accommodation or hotel in {}, {}", city, country)
}
