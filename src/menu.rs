//! Restaurant menu synthesis.
//!
//! The model is asked for five numbered `name;price` lines. Whatever comes
//! back is parsed leniently and padded to exactly [`MENU_LEN`] items with the
//! sentinel record.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheStats, LookupCache};
use crate::llm::prompts::{menu_request, MENU_NOT_FOUND};
use crate::llm::ChatModel;

pub const MENU_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: String,
}

impl MenuItem {
    /// The placeholder used when menu data is missing.
    pub fn sentinel() -> Self {
        Self {
            name: MENU_NOT_FOUND.to_string(),
            price: String::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.name == MENU_NOT_FOUND && self.price.is_empty()
    }
}

/// Five sentinel records.
pub fn sentinel_menu() -> Vec<MenuItem> {
    vec![MenuItem::sentinel(); MENU_LEN]
}

/// Parse a menu completion. Always returns exactly [`MENU_LEN`] items.
pub fn parse_menu(raw: &str) -> Vec<MenuItem> {
    if raw.contains(MENU_NOT_FOUND) {
        return sentinel_menu();
    }

    let mut items: Vec<MenuItem> = raw
        .trim()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(MENU_LEN)
        .map(parse_line)
        .collect();

    items.resize(MENU_LEN, MenuItem::sentinel());
    items
}

/// `"1. Bolognai spagetti;3200Ft"` → name and price. A line that does not
/// have exactly that shape becomes a name with an empty price.
fn parse_line(line: &str) -> MenuItem {
    let parsed = line.split_once('.').and_then(|(_, rest)| {
        let mut parts = rest.split(';');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(price), None) => Some(MenuItem {
                name: name.trim().to_string(),
                price: price.trim().to_string(),
            }),
            _ => None,
        }
    });

    parsed.unwrap_or_else(|| MenuItem {
        name: line.trim().to_string(),
        price: String::new(),
    })
}

pub struct MenuSynthesizer<M> {
    model: M,
    cache: LookupCache<Vec<MenuItem>>,
}

impl<M: ChatModel> MenuSynthesizer<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            cache: LookupCache::new(),
        }
    }

    /// Menu for a restaurant, cached per `(restaurant, city, country)`.
    /// A model failure yields the sentinel menu and is not cached.
    pub fn menu_for(&mut self, restaurant: &str, city: &str, country: &str) -> Vec<MenuItem> {
        let key = CacheKey::new(restaurant, city, country);
        if let Some(cached) = self.cache.get(&key) {
            debug!(%key, "menu cache hit");
            return cached.clone();
        }

        let raw = match self.model.complete(&menu_request(restaurant, city, country)) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(restaurant, error = %e, "menu synthesis failed");
                return sentinel_menu();
            }
        };

        let items = parse_menu(&raw);
        debug!(%key, filled = items.iter().filter(|i| !i.is_sentinel()).count(), "menu parsed");
        self.cache.insert(key, items.clone());
        items
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
