//! What the results panel shows. Pure function of its inputs.

use interchange_core::{CompatibleVehicle, SearchQuery};
use serde::Serialize;

pub const PROMPT_MESSAGE: &str = "Select a vehicle and part to see interchange results";
pub const NOT_FOUND_MESSAGE: &str = "No interchangeable parts found";
pub const NOT_FOUND_HINT: &str = "This part may be unique to your vehicle or not in our database";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    #[serde(flatten)]
    pub record: CompatibleVehicle,
    /// Part number matches the last copied value.
    pub copied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsView {
    /// No search has run yet.
    Prompt,
    NotFound { query: SearchQuery },
    Found { query: SearchQuery, rows: Vec<ResultRow> },
}

impl ResultsView {
    pub fn build(
        query: Option<&SearchQuery>,
        results: &[CompatibleVehicle],
        copied: Option<&str>,
    ) -> Self {
        let Some(query) = query else {
            return ResultsView::Prompt;
        };
        if results.is_empty() {
            return ResultsView::NotFound {
                query: query.clone(),
            };
        }

        let rows = results
            .iter()
            .map(|record| ResultRow {
                copied: copied == Some(record.part_number.as_str()),
                record: record.clone(),
            })
            .collect();

        ResultsView::Found {
            query: query.clone(),
            rows,
        }
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        match self {
            ResultsView::Prompt => None,
            ResultsView::NotFound { query } | ResultsView::Found { query, .. } => Some(query),
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        match self {
            ResultsView::Found { rows, .. } => rows,
            _ => &[],
        }
    }

    /// "Found 4 compatible vehicles"
    pub fn summary(&self) -> Option<String> {
        match self {
            ResultsView::Found { rows, .. } => Some(found_summary(rows.len())),
            _ => None,
        }
    }
}

pub fn found_summary(count: usize) -> String {
    format!(
        "Found {} compatible vehicle{}",
        count,
        if count == 1 { "" } else { "s" }
    )
}
