//! Runtime settings: API keys, endpoints and search limits.
//!
//! Values come from CLI flags or the environment. `.env` files in the
//! working directory and in `<config dir>/school-tripper/` are loaded first;
//! neither overrides variables that are already set.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Args;

use crate::llm::client::{DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL};
use crate::llm::OpenAiChat;
use crate::places::client::DEFAULT_PLACES_BASE_URL;
use crate::places::GooglePlacesClient;
use crate::planner::{SearchLimits, TripPlanner};

pub const APP_DIR: &str = "school-tripper";

/// Planner wired to the live places and model clients.
pub type LivePlanner = TripPlanner<Arc<GooglePlacesClient>, Arc<OpenAiChat>>;

#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Places API key.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,

    /// Chat-completion API key.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Model used for prices and menus.
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "PLACES_BASE_URL", default_value = DEFAULT_PLACES_BASE_URL)]
    pub places_base_url: String,

    /// Hostels returned per search.
    #[arg(long, env = "TRIPPER_HOSTEL_COUNT", default_value_t = 3)]
    pub hostel_count: u32,

    /// Restaurants returned per hostel.
    #[arg(long, env = "TRIPPER_RESTAURANT_COUNT", default_value_t = 4)]
    pub restaurant_count: u32,

    /// Per-request HTTP timeout in seconds.
    #[arg(long, env = "TRIPPER_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {0}. Set it in the environment, a .env file, or pass --{1}")]
    MissingKey(&'static str, &'static str),
    #[error("Search limits must be at least 1 (hostels={hostels}, restaurants={restaurants})")]
    InvalidLimits { hostels: u32, restaurants: u32 },
}

impl Settings {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            hostels: self.hostel_count,
            restaurants: self.restaurant_count,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn places_client(&self) -> Result<GooglePlacesClient, ConfigError> {
        let key = non_empty(&self.google_api_key)
            .ok_or(ConfigError::MissingKey("GOOGLE_API_KEY", "google-api-key"))?;
        Ok(GooglePlacesClient::new(key, self.places_base_url.as_str(), self.timeout()))
    }

    pub fn chat_client(&self) -> Result<OpenAiChat, ConfigError> {
        let key = non_empty(&self.openai_api_key)
            .ok_or(ConfigError::MissingKey("OPENAI_API_KEY", "openai-api-key"))?;
        Ok(OpenAiChat::new(
            key,
            self.openai_base_url.as_str(),
            self.model.as_str(),
            self.timeout(),
        ))
    }

    pub fn build_planner(&self) -> Result<LivePlanner, ConfigError> {
        if self.hostel_count == 0 || self.restaurant_count == 0 {
            return Err(ConfigError::InvalidLimits {
                hostels: self.hostel_count,
                restaurants: self.restaurant_count,
            });
        }
        let places = Arc::new(self.places_client()?);
        let chat = Arc::new(self.chat_client()?);
        Ok(TripPlanner::new(places, chat, self.limits()))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `<config dir>/school-tripper/.env`, if the platform has a config dir.
pub fn user_env_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(".env"))
}

/// Load `./.env` and the per-user `.env`. Returns the files that were read.
pub fn load_env_files() -> Vec<PathBuf> {
    let mut loaded = Vec::new();
    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }
    if let Some(path) = user_env_path() {
        if load_env_file(&path) {
            loaded.push(path);
        }
    }
    loaded
}

pub fn load_env_file(path: &Path) -> bool {
    path.is_file() && dotenvy::from_path(path).is_ok()
}
