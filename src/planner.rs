//! Trip planner, the API object the front end drives.
//!
//! Flow: set country → set city → hostel info (with prices) →
//! restaurants for a hostel → menu for a restaurant.
//!
//! Nothing here returns an error. Lookup failures are logged and replaced
//! with empty lists, `None` or the sentinel menu.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::cache::CacheStats;
use crate::estimate::PriceEstimator;
use crate::llm::ChatModel;
use crate::menu::{sentinel_menu, MenuItem, MenuSynthesizer};
use crate::places::dining::DEFAULT_RESTAURANT_COUNT;
use crate::places::lodging::DEFAULT_HOSTEL_COUNT;
use crate::places::types::ratings_or_empty;
use crate::places::{HostelFinder, Lodging, PlaceResolver, PlacesApi, Restaurant, RestaurantFinder};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Responses ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryResponse {
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityResponse {
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateResponse {
    pub date: Option<String>,
}

/// Hostel results as parallel columns, one entry per hostel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HostelInfo {
    pub names: Vec<String>,
    #[serde(serialize_with = "ratings_or_empty")]
    pub ratings: Vec<Option<f64>>,
    pub photo_urls: Vec<String>,
    pub prices: Vec<String>,
}

impl From<&[Lodging]> for HostelInfo {
    fn from(hostels: &[Lodging]) -> Self {
        Self {
            names: hostels.iter().map(|h| h.name.clone()).collect(),
            ratings: hostels.iter().map(|h| h.rating).collect(),
            photo_urls: hostels.iter().map(|h| h.photo_url.clone()).collect(),
            prices: hostels.iter().map(|h| h.price.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub country: Option<String>,
    pub city: Option<String>,
    pub date: Option<String>,
    pub hostels: Vec<HostelPlan>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostelPlan {
    #[serde(flatten)]
    pub lodging: Lodging,
    pub restaurants: Vec<RestaurantPlan>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantPlan {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlannerStats {
    pub restaurants: CacheStats,
    pub menus: CacheStats,
}

/// Result counts for the two venue searches.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub hostels: u32,
    pub restaurants: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            hostels: DEFAULT_HOSTEL_COUNT,
            restaurants: DEFAULT_RESTAURANT_COUNT,
        }
    }
}

// ─── Planner ────────────────────────────────────────────────────

struct HostelList {
    city: String,
    country: String,
    hostels: Vec<Lodging>,
}

pub struct TripPlanner<P, M> {
    resolver: PlaceResolver<P>,
    hostel_finder: HostelFinder<P>,
    restaurant_finder: RestaurantFinder<P>,
    estimator: PriceEstimator<M>,
    menus: MenuSynthesizer<M>,
    country: Option<String>,
    city: Option<String>,
    date: Option<NaiveDate>,
    last_hostels: Option<HostelList>,
}

impl<P, M> TripPlanner<P, M>
where
    P: PlacesApi + Clone,
    M: ChatModel + Clone,
{
    pub fn new(places: P, model: M, limits: SearchLimits) -> Self {
        Self {
            resolver: PlaceResolver::new(places.clone()),
            hostel_finder: HostelFinder::new(places.clone(), limits.hostels),
            restaurant_finder: RestaurantFinder::new(places, limits.restaurants),
            estimator: PriceEstimator::new(model.clone()),
            menus: MenuSynthesizer::new(model),
            country: None,
            city: None,
            date: None,
            last_hostels: None,
        }
    }
}

impl<P: PlacesApi, M: ChatModel> TripPlanner<P, M> {
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn set_country(&mut self, input: &str) -> CountryResponse {
        self.country = self.correct(input);
        CountryResponse { country: self.country.clone() }
    }

    pub fn set_city(&mut self, input: &str) -> CityResponse {
        self.city = self.correct(input);
        CityResponse { city: self.city.clone() }
    }

    /// Store the trip date. Only `YYYY-MM-DD` is accepted.
    pub fn set_date(&mut self, input: &str) -> DateResponse {
        self.date = match NaiveDate::parse_from_str(input.trim(), DATE_FORMAT) {
            Ok(d) => Some(d),
            Err(e) => {
                warn!(input, error = %e, "invalid trip date");
                None
            }
        };
        DateResponse { date: self.date_string() }
    }

    /// Hostels in the current city with an estimated price each.
    pub fn hostel_info(&mut self) -> HostelInfo {
        HostelInfo::from(self.priced_hostels().as_slice())
    }

    pub fn restaurants_for_hostel(&mut self, hostel_index: usize) -> Vec<Restaurant> {
        let Some((city, country)) = self.location() else {
            return Vec::new();
        };
        let Some(hostel) = self.hostel_at(hostel_index, &city, &country) else {
            return Vec::new();
        };

        self.restaurant_finder
            .find_near(&hostel, &city, &country)
            .unwrap_or_else(|e| {
                warn!(%hostel, error = %e, "restaurant search failed");
                Vec::new()
            })
    }

    pub fn restaurant_menu(&mut self, restaurant_index: usize, hostel_index: usize) -> Vec<MenuItem> {
        let Some((city, country)) = self.location() else {
            return sentinel_menu();
        };
        let restaurants = self.restaurants_for_hostel(hostel_index);
        match restaurants.get(restaurant_index) {
            Some(r) => self.menus.menu_for(&r.name, &city, &country),
            None => sentinel_menu(),
        }
    }

    /// Run the whole sequence for the current location.
    pub fn plan(&mut self) -> TripPlan {
        let lodgings = self.priced_hostels();
        info!(hostels = lodgings.len(), "planning trip");

        let mut hostels = Vec::with_capacity(lodgings.len());
        for (hi, lodging) in lodgings.into_iter().enumerate() {
            let restaurants = self
                .restaurants_for_hostel(hi)
                .into_iter()
                .enumerate()
                .map(|(ri, restaurant)| RestaurantPlan {
                    menu: self.restaurant_menu(ri, hi),
                    restaurant,
                })
                .collect();
            hostels.push(HostelPlan { lodging, restaurants });
        }

        TripPlan {
            country: self.country.clone(),
            city: self.city.clone(),
            date: self.date_string(),
            hostels,
        }
    }

    pub fn stats(&self) -> PlannerStats {
        PlannerStats {
            restaurants: self.restaurant_finder.cache_stats(),
            menus: self.menus.cache_stats(),
        }
    }

    /// Search and price the hostels for the current location. Empty when the
    /// location is unset or the search fails.
    fn priced_hostels(&mut self) -> Vec<Lodging> {
        let Some((city, country)) = self.location() else {
            return Vec::new();
        };

        let mut hostels = match self.hostel_finder.find(&city, &country) {
            Ok(h) => h,
            Err(e) => {
                warn!(%city, %country, error = %e, "hostel search failed");
                return Vec::new();
            }
        };

        for hostel in &mut hostels {
            hostel.price = self.estimator.estimate(&hostel.name, &city, &country);
        }

        self.last_hostels = Some(HostelList {
            city,
            country,
            hostels: hostels.clone(),
        });
        hostels
    }

    fn correct(&self, input: &str) -> Option<String> {
        match self.resolver.resolve(input) {
            Ok(place) => Some(place.display_name),
            Err(e) => {
                warn!(input, error = %e, "place correction failed");
                None
            }
        }
    }

    fn location(&self) -> Option<(String, String)> {
        Some((self.city.clone()?, self.country.clone()?))
    }

    fn date_string(&self) -> Option<String> {
        self.date.map(|d| d.format(DATE_FORMAT).to_string())
    }

    /// Name of the hostel at `index`, searching again only when the last
    /// list was for another location.
    fn hostel_at(&mut self, index: usize, city: &str, country: &str) -> Option<String> {
        let fresh = matches!(&self.last_hostels, Some(l) if l.city == city && l.country == country);
        if !fresh {
            let hostels = match self.hostel_finder.find(city, country) {
                Ok(h) => h,
                Err(e) => {
                    warn!(city, country, error = %e, "hostel search failed");
                    return None;
                }
            };
            self.last_hostels = Some(HostelList {
                city: city.to_string(),
                country: country.to_string(),
                hostels,
            });
        }

        self.last_hostels
            .as_ref()
            .and_then(|l| l.hostels.get(index))
            .map(|h| h.name.clone())
    }
}
