//! Places text-search provider.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::types::{PlaceRecord, PlacesError, SearchTextResponse};

pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";

/// Field mask for place correction.
pub const RESOLVE_FIELD_MASK: &str = "places.displayName,places.location";

/// Field mask for lodging and restaurant discovery.
pub const VENUE_FIELD_MASK: &str = "places.displayName,places.rating,places.photos";

/// Width requested from the photo media endpoint.
pub const PHOTO_MAX_WIDTH_PX: u32 = 400;

/// The places operations the finders depend on.
pub trait PlacesApi {
    /// Run a text search with the given field mask, optionally capping the result count.
    fn search_text(
        &self,
        query: &str,
        field_mask: &str,
        max_results: Option<u32>,
    ) -> Result<Vec<PlaceRecord>, PlacesError>;

    /// Media URL for a photo resource name.
    fn photo_url(&self, photo_name: &str) -> String;
}

impl<T: PlacesApi + ?Sized> PlacesApi for &T {
    fn search_text(
        &self,
        query: &str,
        field_mask: &str,
        max_results: Option<u32>,
    ) -> Result<Vec<PlaceRecord>, PlacesError> {
        (**self).search_text(query, field_mask, max_results)
    }

    fn photo_url(&self, photo_name: &str) -> String {
        (**self).photo_url(photo_name)
    }
}

impl<T: PlacesApi + ?Sized> PlacesApi for Arc<T> {
    fn search_text(
        &self,
        query: &str,
        field_mask: &str,
        max_results: Option<u32>,
    ) -> Result<Vec<PlaceRecord>, PlacesError> {
        (**self).search_text(query, field_mask, max_results)
    }

    fn photo_url(&self, photo_name: &str) -> String {
        (**self).photo_url(photo_name)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchTextRequest<'a> {
    text_query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_result_count: Option<u32>,
}

/// Blocking client for the Google Places (New) API.
pub struct GooglePlacesClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("SchoolTripper/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }
}

impl PlacesApi for GooglePlacesClient {
    fn search_text(
        &self,
        query: &str,
        field_mask: &str,
        max_results: Option<u32>,
    ) -> Result<Vec<PlaceRecord>, PlacesError> {
        let url = format!("{}/places:searchText", self.base_url);
        debug!(query, field_mask, ?max_results, "places search");

        let body = SearchTextRequest {
            text_query: query,
            max_result_count: max_results,
        };

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("X-Goog-Api-Key", &self.api_key)
            .set("X-Goog-FieldMask", field_mask)
            .send_json(&body)
            .map_err(|e| match e {
                ureq::Error::Status(status, resp) => PlacesError::Status {
                    status,
                    body: resp.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(t) => PlacesError::Network(t.to_string()),
            })?;

        let parsed: SearchTextResponse = response
            .into_json()
            .map_err(|e| PlacesError::InvalidResponse(e.to_string()))?;

        debug!(query, results = parsed.places.len(), "places search done");
        Ok(parsed.places)
    }

    fn photo_url(&self, photo_name: &str) -> String {
        format!(
            "{}/{}/media?key={}&max_width_px={}",
            self.base_url, photo_name, self.api_key, PHOTO_MAX_WIDTH_PX
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_url_format() {
        let client = GooglePlacesClient::new("KEY", DEFAULT_PLACES_BASE_URL, Duration::from_secs(5));
        assert_eq!(
            client.photo_url("places/abc/photos/xyz"),
            "https://places.googleapis.com/v1/places/abc/photos/xyz/media?key=KEY&max_width_px=400"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = GooglePlacesClient::new("K", "http://localhost:9000/v1/", Duration::from_secs(5));
        assert_eq!(client.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn test_request_omits_missing_count() {
        let body = SearchTextRequest { text_query: "Hungary", max_result_count: None };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"textQuery":"Hungary"}"#);

        let body = SearchTextRequest { text_query: "x", max_result_count: Some(3) };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"textQuery":"x","maxResultCount":3}"#);
    }
}
