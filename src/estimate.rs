//! Nightly room price estimates from the language model.
//!
//! The prompt asks for `{price}Ft` with no separators. That format is not
//! checked here; the trimmed completion is returned as-is.

use tracing::warn;

use crate::llm::prompts::{price_request, PRICE_NOT_FOUND};
use crate::llm::ChatModel;

pub struct PriceEstimator<M> {
    model: M,
}

impl<M: ChatModel> PriceEstimator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Price for one adult, one room, one night. Never fails: any model
    /// error or blank answer yields [`PRICE_NOT_FOUND`].
    pub fn estimate(&self, venue: &str, city: &str, country: &str) -> String {
        match self.model.complete(&price_request(venue, city, country)) {
            Ok(text) => {
                let price = text.trim();
                if price.is_empty() {
                    warn!(venue, "blank price estimate");
                    PRICE_NOT_FOUND.to_string()
                } else {
                    price.to_string()
                }
            }
            Err(e) => {
                warn!(venue, error = %e, "price estimate failed");
                PRICE_NOT_FOUND.to_string()
            }
        }
    }
}
