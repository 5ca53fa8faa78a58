//! The page coordinator: latest vehicle + latest part search → query and
//! result set.
//!
//! ```text
//! NoVehicle ──vehicle──> VehicleOnly ──search──> VehicleAndQuery
//!     │                                           │  ▲
//!     └─search (dropped)                          └──┘ vehicle | search
//! ```
//!
//! A new vehicle never recomputes the current query; only the next search
//! does.

use std::sync::Arc;

use interchange_core::{CompatibleVehicle, PartQuery, SearchQuery, Vehicle};
use serde::Serialize;

use crate::matcher::InterchangeMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorState {
    NoVehicle,
    VehicleOnly,
    VehicleAndQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A query was built and the result set replaced.
    Searched { result_count: usize },
    /// No vehicle selected yet; nothing changed.
    Dropped,
}

pub struct Coordinator {
    matcher: Arc<dyn InterchangeMatcher>,
    vehicle: Option<Vehicle>,
    last_part: Option<PartQuery>,
    query: Option<SearchQuery>,
    results: Vec<CompatibleVehicle>,
}

impl Coordinator {
    pub fn new(matcher: Arc<dyn InterchangeMatcher>) -> Self {
        Self {
            matcher,
            vehicle: None,
            last_part: None,
            query: None,
            results: Vec::new(),
        }
    }

    pub fn on_vehicle_selected(&mut self, vehicle: Vehicle) {
        tracing::debug!(vehicle = %vehicle, "coordinator received vehicle");
        self.vehicle = Some(vehicle);
    }

    /// Handle "search requested". Without a vehicle the request is dropped
    /// and the displayed query/results stay as they were.
    pub fn on_part_search(&mut self, part: PartQuery) -> SearchOutcome {
        self.last_part = Some(part.clone());

        let Some(vehicle) = &self.vehicle else {
            tracing::debug!(part = %part.name, "part search dropped: no vehicle selected");
            return SearchOutcome::Dropped;
        };

        let query = SearchQuery::new(vehicle.clone(), part);
        let results = self.matcher.find_compatible(&query);
        tracing::info!(
            vehicle = %query.vehicle,
            part = %query.part.name,
            results = results.len(),
            "interchange search"
        );

        let result_count = results.len();
        self.query = Some(query);
        self.results = results;
        SearchOutcome::Searched { result_count }
    }

    pub fn state(&self) -> CoordinatorState {
        match (&self.vehicle, &self.query) {
            (None, _) => CoordinatorState::NoVehicle,
            (Some(_), None) => CoordinatorState::VehicleOnly,
            (Some(_), Some(_)) => CoordinatorState::VehicleAndQuery,
        }
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    /// Most recent part search, including dropped ones.
    pub fn last_part(&self) -> Option<&PartQuery> {
        self.last_part.as_ref()
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    pub fn results(&self) -> &[CompatibleVehicle] {
        &self.results
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("state", &self.state())
            .field("vehicle", &self.vehicle)
            .field("query", &self.query)
            .field("results", &self.results.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::StaticMatcher;
    use interchange_core::{canonical_results, Confidence};

    fn coordinator() -> Coordinator {
        Coordinator::new(Arc::new(StaticMatcher::default()))
    }

    fn ram() -> Vehicle {
        Vehicle::new("2001", "Dodge", "Ram 1500")
    }

    #[test]
    fn starts_empty() {
        let c = coordinator();
        assert_eq!(c.state(), CoordinatorState::NoVehicle);
        assert!(c.query().is_none());
        assert!(c.results().is_empty());
    }

    #[test]
    fn search_without_vehicle_is_dropped() {
        let mut c = coordinator();
        let outcome = c.on_part_search(PartQuery::new("Engine", "Starter Motor"));

        assert_eq!(outcome, SearchOutcome::Dropped);
        assert_eq!(c.state(), CoordinatorState::NoVehicle);
        assert!(c.query().is_none());
        assert!(c.results().is_empty());
        assert_eq!(c.last_part().map(|p| p.name.as_str()), Some("Starter Motor"));
    }

    #[test]
    fn starter_scenario() {
        let mut c = coordinator();
        c.on_vehicle_selected(ram());
        assert_eq!(c.state(), CoordinatorState::VehicleOnly);

        let outcome = c.on_part_search(PartQuery::new("Engine", "Starter Motor"));
        assert_eq!(outcome, SearchOutcome::Searched { result_count: 4 });
        assert_eq!(c.state(), CoordinatorState::VehicleAndQuery);

        let first = &c.results()[0];
        assert_eq!(first.identity(), "2001 Dodge Ram 1500");
        assert_eq!(first.confidence, Confidence::High);
        assert_eq!(first.part_number, "STM-1001-A");
        assert_eq!(c.query().unwrap().vehicle, ram());
    }

    #[test]
    fn brake_pads_scenario() {
        let mut c = coordinator();
        c.on_vehicle_selected(ram());
        c.on_part_search(PartQuery::new("Brakes", "Brake Pads"));
        assert_eq!(c.results(), &canonical_results()[..2]);
    }

    #[test]
    fn new_vehicle_does_not_recompute_query() {
        let mut c = coordinator();
        c.on_vehicle_selected(ram());
        c.on_part_search(PartQuery::new("Engine", "Starter Motor"));

        let tahoe = Vehicle::new("2015", "Chevrolet", "Tahoe");
        c.on_vehicle_selected(tahoe.clone());
        assert_eq!(c.state(), CoordinatorState::VehicleAndQuery);
        assert_eq!(c.query().unwrap().vehicle, ram());
        assert_eq!(c.results().len(), 4);

        c.on_part_search(PartQuery::new("Engine", "Alternator"));
        assert_eq!(c.query().unwrap().vehicle, tahoe);
        assert_eq!(c.results().len(), 2);
    }

    #[test]
    fn later_search_replaces_results() {
        let mut c = coordinator();
        c.on_vehicle_selected(ram());
        c.on_part_search(PartQuery::new("Brakes", "Brake Pads"));
        let before = c.results().to_vec();

        c.on_part_search(PartQuery::new("Engine", "Starter").with_part_number("X-1"));
        assert_ne!(c.results(), before.as_slice());
        assert_eq!(c.query().unwrap().part.part_number.as_deref(), Some("X-1"));
    }
}
