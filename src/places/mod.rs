//! Places subsystem: place correction, lodging and restaurant discovery
//! over the places text-search API.

pub mod client;
pub mod dining;
pub mod lodging;
pub mod resolver;
pub mod types;

pub use client::{GooglePlacesClient, PlacesApi};
pub use dining::RestaurantFinder;
pub use lodging::HostelFinder;
pub use resolver::PlaceResolver;
pub use types::{LatLng, Lodging, Place, PlacesError, Restaurant};
