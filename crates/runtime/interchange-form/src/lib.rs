//! # Interchange Form
//!
//! The decision-making side of the search page.
//!
//! ```text
//! VehicleSelector ──(vehicle selected)──┐
//!                                       ├──> Coordinator ──> ResultsView
//! PartSearch ─────(search requested)────┘         │
//!                                           InterchangeMatcher
//! ```
//!
//! Leaves emit events upward by returning them; the coordinator owns the
//! derived query and result set. No component reads another's state.

pub mod coordinator;
pub mod feedback;
pub mod matcher;
pub mod page;
pub mod part;
pub mod results;
pub mod vehicle;

pub use coordinator::{Coordinator, CoordinatorState, SearchOutcome};
pub use feedback::{CopyFeedback, COPY_FEEDBACK_DELAY};
pub use matcher::{InterchangeMatcher, StaticMatcher};
pub use page::Page;
pub use part::{PartField, PartSearch, CUSTOM_PART, CUSTOM_PART_LABEL};
pub use results::{ResultRow, ResultsView};
pub use vehicle::{VehicleField, VehicleSelector};

/// Errors raised by the selection controls
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("'{value}' is not an offered {field}")]
    UnknownChoice { field: &'static str, value: String },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Search needs a category and a part name")]
    SearchDisabled,
}
