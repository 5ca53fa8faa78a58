//! One search page: both forms, the coordinator and the copy indicator,
//! wired the way the page composes them.

use std::sync::Arc;

use interchange_core::{Catalog, PartQuery, Vehicle};

use crate::coordinator::{Coordinator, SearchOutcome};
use crate::feedback::CopyFeedback;
use crate::matcher::InterchangeMatcher;
use crate::part::{PartSearch, CUSTOM_PART};
use crate::results::ResultsView;
use crate::vehicle::{VehicleField, VehicleSelector};
use crate::FormError;

#[derive(Debug)]
pub struct Page {
    pub vehicle: VehicleSelector,
    pub part: PartSearch,
    pub coordinator: Coordinator,
    pub copied: CopyFeedback,
}

impl Page {
    pub fn new(catalog: Arc<Catalog>, matcher: Arc<dyn InterchangeMatcher>) -> Self {
        Self {
            vehicle: VehicleSelector::new(Arc::clone(&catalog)),
            part: PartSearch::new(catalog),
            coordinator: Coordinator::new(matcher),
            copied: CopyFeedback::new(),
        }
    }

    /// Forward a vehicle field change, notifying the coordinator when the
    /// selection completes.
    pub fn select_vehicle(&mut self, field: VehicleField, value: &str) -> Result<Option<Vehicle>, FormError> {
        let selected = self.vehicle.select(field, value)?;
        if let Some(vehicle) = &selected {
            self.coordinator.on_vehicle_selected(vehicle.clone());
        }
        Ok(selected)
    }

    /// Press "Search Interchangeable Parts". `None` while the button is
    /// disabled.
    pub fn search(&mut self) -> Option<SearchOutcome> {
        let request = self.part.request()?;
        Some(self.coordinator.on_part_search(request))
    }

    /// Drive a fresh page through the same controls a user would: pick the
    /// vehicle, pick the part (names outside the category's list go through
    /// the custom field), then press search.
    pub fn search_for(
        catalog: Arc<Catalog>,
        matcher: Arc<dyn InterchangeMatcher>,
        vehicle: &Vehicle,
        part: &PartQuery,
    ) -> Result<(Self, SearchOutcome), FormError> {
        let mut page = Self::new(catalog, matcher);
        page.select_vehicle(VehicleField::Year, &vehicle.year)?;
        page.select_vehicle(VehicleField::Make, &vehicle.make)?;
        page.select_vehicle(VehicleField::Model, &vehicle.model)?;

        page.part.select_category(&part.category)?;
        if page.part.part_options().iter().any(|o| o == &part.name && o != CUSTOM_PART) {
            page.part.select_part(&part.name)?;
        } else {
            page.part.select_part(CUSTOM_PART)?;
            page.part.set_custom_name(part.name.as_str());
        }
        if let Some(number) = &part.part_number {
            page.part.set_part_number(number.as_str());
        }

        let outcome = page.search().ok_or(FormError::SearchDisabled)?;
        Ok((page, outcome))
    }

    pub fn results_view(&self) -> ResultsView {
        let copied = self.copied.last_copied();
        ResultsView::build(
            self.coordinator.query(),
            self.coordinator.results(),
            copied.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::CoordinatorState;
    use crate::matcher::StaticMatcher;

    fn page() -> Page {
        Page::new(
            Arc::new(Catalog::builtin(2024)),
            Arc::new(StaticMatcher::default()),
        )
    }

    fn pick_ram(page: &mut Page) {
        page.select_vehicle(VehicleField::Year, "2001").unwrap();
        page.select_vehicle(VehicleField::Make, "Dodge").unwrap();
        page.select_vehicle(VehicleField::Model, "Ram 1500").unwrap();
    }

    #[test]
    fn full_flow() {
        let mut page = page();
        assert_eq!(page.results_view(), ResultsView::Prompt);

        pick_ram(&mut page);
        assert_eq!(page.coordinator.state(), CoordinatorState::VehicleOnly);

        assert_eq!(page.search(), None, "button disabled");

        page.part.select_category("Engine").unwrap();
        page.part.select_part("Starter Motor").unwrap();
        assert_eq!(page.search(), Some(SearchOutcome::Searched { result_count: 4 }));
        assert_eq!(page.results_view().rows().len(), 4);
    }

    #[test]
    fn search_before_vehicle_changes_nothing() {
        let mut page = page();
        page.part.select_category("Brakes").unwrap();
        page.part.select_part("Brake Pads").unwrap();

        assert_eq!(page.search(), Some(SearchOutcome::Dropped));
        assert_eq!(page.results_view(), ResultsView::Prompt);
    }

    #[test]
    fn incomplete_vehicle_keeps_last_complete_one() {
        let mut page = page();
        pick_ram(&mut page);
        // Make change clears model; coordinator keeps the Ram.
        page.select_vehicle(VehicleField::Make, "Ford").unwrap();

        page.part.select_category("Brakes").unwrap();
        page.part.select_part("Brake Pads").unwrap();
        page.search();

        let view = page.results_view();
        assert_eq!(view.query().unwrap().vehicle.model, "Ram 1500");
        assert_eq!(view.rows().len(), 2);
    }

    #[test]
    fn search_for_catalog_part() {
        let (page, outcome) = Page::search_for(
            Arc::new(Catalog::builtin(2024)),
            Arc::new(StaticMatcher::default()),
            &Vehicle::new("2001", "Dodge", "Ram 1500"),
            &PartQuery::new("Engine", "Starter Motor").with_part_number("STM-1001-A"),
        )
        .unwrap();

        assert_eq!(outcome, SearchOutcome::Searched { result_count: 4 });
        assert!(!page.part.is_custom());
        let query = page.coordinator.query().unwrap();
        assert_eq!(query.part.part_number.as_deref(), Some("STM-1001-A"));
    }

    #[test]
    fn search_for_free_text_part_uses_custom_path() {
        let (page, outcome) = Page::search_for(
            Arc::new(Catalog::builtin(2024)),
            Arc::new(StaticMatcher::default()),
            &Vehicle::new("2001", "Dodge", "Ram 1500"),
            &PartQuery::new("Brakes", "Heavy Duty Starter"),
        )
        .unwrap();

        assert!(page.part.is_custom());
        assert_eq!(outcome, SearchOutcome::Searched { result_count: 4 });
    }

    #[test]
    fn search_for_rejects_bad_input() {
        let catalog = Arc::new(Catalog::builtin(2024));
        let matcher: Arc<dyn InterchangeMatcher> = Arc::new(StaticMatcher::default());

        let err = Page::search_for(
            Arc::clone(&catalog),
            Arc::clone(&matcher),
            &Vehicle::new("2001", "Dodge", "F-150"),
            &PartQuery::new("Engine", "Starter Motor"),
        )
        .unwrap_err();
        assert_eq!(err, FormError::UnknownChoice { field: "model", value: "F-150".into() });

        let err = Page::search_for(
            catalog,
            matcher,
            &Vehicle::new("2001", "Dodge", "Ram 1500"),
            &PartQuery::new("Engine", ""),
        )
        .unwrap_err();
        assert_eq!(err, FormError::SearchDisabled);
    }
}
