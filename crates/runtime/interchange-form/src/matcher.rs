//! Interchange lookup.
//!
//! [`StaticMatcher`] is a fixed demonstration rule, not a matching
//! algorithm: starter searches get the whole table, everything else gets its
//! first two rows. A real parts database plugs in behind the same trait.

use interchange_core::{canonical_results, CompatibleVehicle, SearchQuery};

/// Query in, confidence-tagged result list out.
pub trait InterchangeMatcher: Send + Sync {
    fn find_compatible(&self, query: &SearchQuery) -> Vec<CompatibleVehicle>;
}

const STARTER_KEYWORD: &str = "starter";
const PARTIAL_RESULT_COUNT: usize = 2;

#[derive(Debug, Clone)]
pub struct StaticMatcher {
    records: Vec<CompatibleVehicle>,
}

impl StaticMatcher {
    pub fn new(records: Vec<CompatibleVehicle>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CompatibleVehicle] {
        &self.records
    }
}

impl Default for StaticMatcher {
    fn default() -> Self {
        Self::new(canonical_results())
    }
}

impl InterchangeMatcher for StaticMatcher {
    fn find_compatible(&self, query: &SearchQuery) -> Vec<CompatibleVehicle> {
        if query.part.name.to_lowercase().contains(STARTER_KEYWORD) {
            self.records.clone()
        } else {
            self.records
                .iter()
                .take(PARTIAL_RESULT_COUNT)
                .cloned()
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interchange_core::{PartQuery, Vehicle};

    fn query(category: &str, name: &str) -> SearchQuery {
        SearchQuery::new(
            Vehicle::new("2001", "Dodge", "Ram 1500"),
            PartQuery::new(category, name),
        )
    }

    #[test]
    fn starter_returns_full_table_in_order() {
        let matcher = StaticMatcher::default();
        for name in ["Starter Motor", "STARTER", "remanufactured starter solenoid"] {
            assert_eq!(matcher.find_compatible(&query("Engine", name)), canonical_results());
        }
    }

    #[test]
    fn other_parts_get_first_two_rows() {
        let matcher = StaticMatcher::default();
        let results = matcher.find_compatible(&query("Brakes", "Brake Pads"));
        assert_eq!(results, canonical_results()[..2].to_vec());
    }

    #[test]
    fn category_does_not_matter() {
        let matcher = StaticMatcher::default();
        assert_eq!(matcher.find_compatible(&query("Body", "Starter Motor")).len(), 4);
        assert_eq!(matcher.find_compatible(&query("Engine", "Alternator")).len(), 2);
    }

    #[test]
    fn short_table_is_not_padded() {
        let one = canonical_results().into_iter().take(1).collect::<Vec<_>>();
        let matcher = StaticMatcher::new(one.clone());
        assert_eq!(matcher.find_compatible(&query("Brakes", "Brake Pads")), one);
        assert!(StaticMatcher::new(Vec::new())
            .find_compatible(&query("Engine", "Starter Motor"))
            .is_empty());
    }
}
