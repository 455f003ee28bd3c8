//! Core types for the places subsystem.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Hostel name used when the search result carries no display name.
pub const UNKNOWN_HOSTEL_NAME: &str = "Nincs ilyen hotel";

/// Restaurant name and rating used when the search result omits them.
pub const NOT_AVAILABLE: &str = "N/A";

/// A corrected place: the provider's display name plus its location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub display_name: String,
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// A lodging found near the trip destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lodging {
    pub name: String,
    #[serde(serialize_with = "rating_or_empty")]
    pub rating: Option<f64>,
    pub photo_url: String,
    /// Estimated nightly price; empty until the estimator has run.
    pub price: String,
}

/// A restaurant found near a lodging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub name: String,
    #[serde(serialize_with = "rating_or_na")]
    pub rating: Option<f64>,
    pub photo_url: String,
}

// ─── Wire records ───────────────────────────────────────────────

/// Response body of `places:searchText`. Only the masked fields are present.
#[derive(Deserialize, Debug, Default)]
pub struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<PlaceRecord>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceRecord {
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub photos: Vec<PhotoRecord>,
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PhotoRecord {
    /// Resource name, e.g. `places/ChIJ.../photos/AUc7...`
    #[serde(default)]
    pub name: String,
}

impl PlaceRecord {
    pub fn display_text(&self) -> Option<&str> {
        self.display_name
            .as_ref()
            .map(|d| d.text.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn first_photo(&self) -> Option<&str> {
        self.photos.first().map(|p| p.name.as_str())
    }
}

// ─── Rating serialization ───────────────────────────────────────

fn rating_or_empty<S: Serializer>(rating: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match rating {
        Some(r) => s.serialize_f64(*r),
        None => s.serialize_str(""),
    }
}

fn rating_or_na<S: Serializer>(rating: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    match rating {
        Some(r) => s.serialize_f64(*r),
        None => s.serialize_str(NOT_AVAILABLE),
    }
}

/// Serialize a rating column the way lodging ratings are shown.
pub(crate) fn ratings_or_empty<S: Serializer>(ratings: &[Option<f64>], s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeSeq;
    let mut seq = s.serialize_seq(Some(ratings.len()))?;
    for r in ratings {
        match r {
            Some(v) => seq.serialize_element(v)?,
            None => seq.serialize_element("")?,
        }
    }
    seq.end()
}

// ─── Errors ─────────────────────────────────────────────────────

/// Places API errors.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Places API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
    #[error("Place not found: '{0}'")]
    NotFound(String),
    #[error("Empty place query")]
    EmptyQuery,
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(f, "{} ({:.4}, {:.4})", self.display_name, loc.latitude, loc.longitude),
            None => write!(f, "{}", self.display_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_response() {
        let body = r#"{
            "places": [{
                "displayName": {"text": "Budapest", "languageCode": "hu"},
                "location": {"latitude": 47.4979, "longitude": 19.0402}
            }]
        }"#;
        let resp: SearchTextResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.places.len(), 1);
        assert_eq!(resp.places[0].display_text(), Some("Budapest"));
        let loc = resp.places[0].location.unwrap();
        approx::assert_abs_diff_eq!(loc.latitude, 47.4979, epsilon = 1e-6);
    }

    #[test]
    fn test_display_name_without_text_is_missing() {
        let body = r#"{"places": [{"displayName": {"languageCode": "en"}, "rating": 4.1}]}"#;
        let resp: SearchTextResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.places[0].display_text(), None);
        assert_eq!(resp.places[0].rating, Some(4.1));
    }

    #[test]
    fn test_decode_empty_body() {
        let resp: SearchTextResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.places.is_empty());
    }

    #[test]
    fn test_lodging_rating_serializes_empty() {
        let h = Lodging {
            name: "Hostel One".into(),
            rating: None,
            photo_url: String::new(),
            price: "5500Ft".into(),
        };
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(v["rating"], "");
    }

    #[test]
    fn test_restaurant_rating_serializes_na() {
        let r = Restaurant {
            name: "Bistro".into(),
            rating: None,
            photo_url: String::new(),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["rating"], "N/A");

        let r = Restaurant { rating: Some(4.5), ..r };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["rating"], 4.5);
    }

    #[test]
    fn test_place_display() {
        let p = Place { display_name: "Hungary".into(), location: None };
        assert_eq!(p.to_string(), "Hungary");
    }
}
