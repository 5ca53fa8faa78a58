//! # Interchange Core
//!
//! Data model and reference tables for Parts Interchange Buddy.
//!
//! ```text
//! Vehicle ──┐
//!           ├── SearchQuery ──> matcher ──> [CompatibleVehicle]
//! PartQuery ┘
//! ```
//!
//! Everything here is plain data. Selection state and matching live in
//! `interchange-form`.

pub mod catalog;
pub mod model;

pub use catalog::{
    canonical_results, Catalog, CategoryEntry, MakeEntry, DEFAULT_YEAR_SPAN, MAX_YEAR_SPAN,
};
pub use model::{CompatibleVehicle, Confidence, PartQuery, SearchQuery, Vehicle};

/// Result type for interchange-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in interchange-core
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Catalog section '{0}' is empty")]
    EmptyCatalog(&'static str),

    #[error("Duplicate {kind} entry: {name}")]
    DuplicateEntry { kind: &'static str, name: String },

    #[error("Year span {0} must be between 1 and 200 and stay within the i32 year range")]
    InvalidYearSpan(u32),

    #[error("Unknown confidence level: {0}")]
    UnknownConfidence(String),
}
