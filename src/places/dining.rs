//! Restaurant discovery around a lodging, cached per `(hostel, city, country)`.

use tracing::debug;

use super::client::{PlacesApi, VENUE_FIELD_MASK};
use super::types::{PlaceRecord, PlacesError, Restaurant, NOT_AVAILABLE};
use crate::cache::{CacheKey, CacheStats, LookupCache};

pub const DEFAULT_RESTAURANT_COUNT: u32 = 4;

pub struct RestaurantFinder<P> {
    api: P,
    max_results: u32,
    cache: LookupCache<Vec<Restaurant>>,
}

impl<P: PlacesApi> RestaurantFinder<P> {
    pub fn new(api: P, max_results: u32) -> Self {
        Self {
            api,
            max_results,
            cache: LookupCache::new(),
        }
    }

    /// Restaurants near `hostel`. A repeated lookup is served from the cache
    /// without a network call; failed lookups are not cached.
    pub fn find_near(
        &mut self,
        hostel: &str,
        city: &str,
        country: &str,
    ) -> Result<Vec<Restaurant>, PlacesError> {
        let key = CacheKey::new(hostel, city, country);
        if let Some(cached) = self.cache.get(&key) {
            debug!(%key, "restaurant cache hit");
            return Ok(cached.clone());
        }

        let query = restaurant_query(hostel, city, country);
        let records = self
            .api
            .search_text(&query, VENUE_FIELD_MASK, Some(self.max_results))?;
        let restaurants: Vec<Restaurant> = records.iter().map(|r| self.to_restaurant(r)).collect();

        debug!(%key, found = restaurants.len(), "restaurant search");
        self.cache.insert(key, restaurants.clone());
        Ok(restaurants)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn to_restaurant(&self, record: &PlaceRecord) -> Restaurant {
        Restaurant {
            name: record.display_text().unwrap_or(NOT_AVAILABLE).to_string(),
            rating: record.rating,
            photo_url: record
                .first_photo()
                .map(|p| self.api.photo_url(p))
                .unwrap_or_default(),
        }
    }
}

pub fn restaurant_query(hostel: &str, city: &str, country: &str) -> String {
    format!("restaurant near {}, {}, {}", hostel, city, country)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{record, FakePlaces};

    #[test]
    fn test_restaurant_query_text() {
        assert_eq!(
            restaurant_query("Wombat's", "Budapest", "Hungary"),
            "restaurant near Wombat's, Budapest, Hungary"
        );
    }

    #[test]
    fn test_find_near_maps_and_caps() {
        let places = FakePlaces::new().respond(
            "restaurant near Wombat's",
            vec![record("Frici Papa", Some(4.4)), PlaceRecord::default()],
        );
        let mut finder = RestaurantFinder::new(&places, DEFAULT_RESTAURANT_COUNT);
        let restaurants = finder.find_near("Wombat's", "Budapest", "Hungary").unwrap();

        assert_eq!(restaurants.len(), 2);
        assert_eq!(restaurants[0].name, "Frici Papa");
        assert_eq!(restaurants[1].name, NOT_AVAILABLE);
        assert_eq!(restaurants[1].rating, None);
        assert_eq!(places.last_max_results(), Some(Some(4)));
    }

    #[test]
    fn test_second_lookup_hits_cache() {
        let places = FakePlaces::new().respond("Wombat's", vec![record("Frici Papa", Some(4.4))]);
        let mut finder = RestaurantFinder::new(&places, 4);

        let first = finder.find_near("Wombat's", "Budapest", "Hungary").unwrap();
        let second = finder.find_near("Wombat's", "Budapest", "Hungary").unwrap();

        assert_eq!(first, second);
        assert_eq!(places.calls(), 1);
        let stats = finder.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_different_city_is_a_new_lookup() {
        let places = FakePlaces::new();
        let mut finder = RestaurantFinder::new(&places, 4);
        finder.find_near("Central Hostel", "Budapest", "Hungary").unwrap();
        finder.find_near("Central Hostel", "Szeged", "Hungary").unwrap();
        assert_eq!(places.calls(), 2);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let places = FakePlaces::new().failing();
        let mut finder = RestaurantFinder::new(&places, 4);
        assert!(finder.find_near("H", "C", "K").is_err());
        assert!(finder.find_near("H", "C", "K").is_err());
        assert_eq!(places.calls(), 2);
        assert_eq!(finder.cache_stats().entries, 0);
    }
}
