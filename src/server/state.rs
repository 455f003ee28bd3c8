use std::sync::Mutex;

use crate::planner::TripPlanner;

/// Shared server state. The planner and its caches sit behind one lock,
/// so requests are served one planner call at a time.
pub struct AppState<P, M> {
    pub planner: Mutex<TripPlanner<P, M>>,
}

impl<P, M> AppState<P, M> {
    pub fn new(planner: TripPlanner<P, M>) -> Self {
        Self {
            planner: Mutex::new(planner),
        }
    }
}
