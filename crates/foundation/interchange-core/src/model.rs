//! Vehicles, part queries and interchange records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fully selected vehicle. Never surfaced while partially selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    pub year: String,
    pub make: String,
    pub model: String,
}

impl Vehicle {
    pub fn new(year: impl Into<String>, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            make: make.into(),
            model: model.into(),
        }
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.make, self.model)
    }
}

/// The part side of a search.
///
/// `name` is either a catalog value or a free-text override. `part_number`
/// is advisory and never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartQuery {
    pub category: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
}

impl PartQuery {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            part_number: None,
        }
    }

    pub fn with_part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = Some(part_number.into());
        self
    }
}

/// Snapshot pairing of a vehicle and a part, copied by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub vehicle: Vehicle,
    pub part: PartQuery,
}

impl SearchQuery {
    pub fn new(vehicle: Vehicle, part: PartQuery) -> Self {
        Self { vehicle, part }
    }
}

/// How certain an interchange match is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Confidence {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Confidence::High),
            "medium" => Ok(Confidence::Medium),
            "low" => Ok(Confidence::Low),
            other => Err(crate::Error::UnknownConfidence(other.to_string())),
        }
    }
}

/// One row of an interchange result set. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibleVehicle {
    pub year: String,
    pub make: String,
    pub model: String,
    pub confidence: Confidence,
    pub part_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CompatibleVehicle {
    /// "2001 Dodge Ram 1500"
    pub fn identity(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}
