//! Fakes for the places and chat seams. Each counts its calls so tests can
//! tell cache hits from network round trips.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::llm::{ChatModel, ChatRequest, LlmError};
use crate::places::types::{LatLng, LocalizedText, PlaceRecord};
use crate::places::{PlacesApi, PlacesError};

pub fn record(name: &str, rating: Option<f64>) -> PlaceRecord {
    PlaceRecord {
        display_name: Some(LocalizedText {
            text: name.to_string(),
            language_code: None,
        }),
        rating,
        ..PlaceRecord::default()
    }
}

/// Answers a search with the records registered for the first matching
/// query substring, or an empty list.
#[derive(Default)]
pub struct FakePlaces {
    responses: Vec<(String, Vec<PlaceRecord>)>,
    fail: bool,
    calls: AtomicUsize,
    last: Mutex<Option<(String, String, Option<u32>)>>,
}

impl FakePlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, query_part: &str, records: Vec<PlaceRecord>) -> Self {
        self.responses.push((query_part.to_string(), records));
        self
    }

    pub fn respond_located(self, query_part: &str, name: &str, latitude: f64, longitude: f64) -> Self {
        let mut r = record(name, None);
        r.location = Some(LatLng { latitude, longitude });
        self.respond(query_part, vec![r])
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last.lock().unwrap().as_ref().map(|(q, _, _)| q.clone())
    }

    pub fn last_field_mask(&self) -> Option<String> {
        self.last.lock().unwrap().as_ref().map(|(_, m, _)| m.clone())
    }

    pub fn last_max_results(&self) -> Option<Option<u32>> {
        self.last.lock().unwrap().as_ref().map(|(_, _, n)| *n)
    }
}

impl PlacesApi for FakePlaces {
    fn search_text(
        &self,
        query: &str,
        field_mask: &str,
        max_results: Option<u32>,
    ) -> Result<Vec<PlaceRecord>, PlacesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((query.to_string(), field_mask.to_string(), max_results));
        if self.fail {
            return Err(PlacesError::Network("connection refused".into()));
        }
        Ok(self
            .responses
            .iter()
            .find(|(part, _)| query.contains(part.as_str()))
            .map(|(_, records)| records.clone())
            .unwrap_or_default())
    }

    fn photo_url(&self, photo_name: &str) -> String {
        format!("fake://{}", photo_name)
    }
}

/// Replies with the text registered for the first matching user-prompt
/// substring, or an empty completion error.
#[derive(Default)]
pub struct FakeChat {
    replies: Vec<(String, String)>,
    fail: bool,
    calls: AtomicUsize,
    last_user: Mutex<Option<String>>,
}

impl FakeChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, user_part: &str, text: &str) -> Self {
        self.replies.push((user_part.to_string(), text.to_string()));
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_user(&self) -> Option<String> {
        self.last_user.lock().unwrap().clone()
    }
}

impl ChatModel for FakeChat {
    fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user.lock().unwrap() = Some(request.user.clone());
        if self.fail {
            return Err(LlmError::Status { status: 500, body: "boom".into() });
        }
        self.replies
            .iter()
            .find(|(part, _)| request.user.contains(part.as_str()))
            .map(|(_, text)| text.clone())
            .ok_or(LlmError::EmptyCompletion)
    }
}
