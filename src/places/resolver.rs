//! Place correction: free text in, the provider's display name out.

use tracing::debug;

use super::client::{PlacesApi, RESOLVE_FIELD_MASK};
use super::types::{Place, PlacesError};

pub struct PlaceResolver<P> {
    api: P,
}

impl<P: PlacesApi> PlaceResolver<P> {
    pub fn new(api: P) -> Self {
        Self { api }
    }

    /// Resolve a country or city name to the first matching place.
    pub fn resolve(&self, input: &str) -> Result<Place, PlacesError> {
        let query = input.trim();
        if query.is_empty() {
            return Err(PlacesError::EmptyQuery);
        }

        let records = self.api.search_text(query, RESOLVE_FIELD_MASK, None)?;
        let first = records
            .into_iter()
            .next()
            .ok_or_else(|| PlacesError::NotFound(query.to_string()))?;

        let display_name = first
            .display_text()
            .map(str::to_string)
            .ok_or_else(|| PlacesError::NotFound(query.to_string()))?;

        debug!(query, resolved = %display_name, "place corrected");
        Ok(Place {
            display_name,
            location: first.location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record, FakePlaces};

    #[test]
    fn test_resolve_first_match() {
        let places = FakePlaces::new()
            .respond("magyarorszag", vec![record("Hungary", None), record("Hungarian Village", None)]);
        let resolver = PlaceResolver::new(&places);
        let place = resolver.resolve("  magyarorszag ").unwrap();
        assert_eq!(place.display_name, "Hungary");
        assert_eq!(places.calls(), 1);
        assert_eq!(places.last_field_mask().as_deref(), Some(RESOLVE_FIELD_MASK));
        assert_eq!(places.last_max_results(), Some(None));
    }

    #[test]
    fn test_resolve_keeps_location() {
        let places = FakePlaces::new().respond_located("budapest", "Budapest", 47.4979, 19.0402);
        let place = PlaceResolver::new(&places).resolve("budapest").unwrap();
        let loc = place.location.unwrap();
        approx::assert_abs_diff_eq!(loc.longitude, 19.0402, epsilon = 1e-6);
    }

    #[test]
    fn test_resolve_no_results() {
        let places = FakePlaces::new();
        let err = PlaceResolver::new(&places).resolve("atlantis").unwrap_err();
        assert!(matches!(err, PlacesError::NotFound(q) if q == "atlantis"));
    }

    #[test]
    fn test_resolve_empty_input_skips_network() {
        let places = FakePlaces::new();
        let err = PlaceResolver::new(&places).resolve("   ").unwrap_err();
        assert!(matches!(err, PlacesError::EmptyQuery));
        assert_eq!(places.calls(), 0);
    }

    #[test]
    fn test_resolve_propagates_network_error() {
        let places = FakePlaces::new().failing();
        let err = PlaceResolver::new(&places).resolve("Vienna").unwrap_err();
        assert!(matches!(err, PlacesError::Network(_)));
    }
}
