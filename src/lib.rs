//! School Tripper: hostel, restaurant and menu discovery for school trips.
//!
//! Place data comes from a places text-search API. Where no authoritative
//! data exists (room prices, menus) a language model fills in plausible
//! values, falling back to fixed sentinel records on any failure.

pub mod cache;
pub mod config;
pub mod estimate;
pub mod llm;
pub mod menu;
pub mod places;
pub mod planner;
pub mod server;

#[cfg(test)]
mod testing;

pub use menu::MenuItem;
pub use planner::{HostelInfo, TripPlan, TripPlanner};
