//! Reference catalogs: years, makes → models, categories → parts, and the
//! canonical interchange table.
//!
//! These are data, not logic. The built-in tables can be swapped for a data
//! file through `interchange-config`.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::{CompatibleVehicle, Confidence};
use crate::{Error, Result};

/// Number of model years offered, newest first.
pub const DEFAULT_YEAR_SPAN: u32 = 35;

/// Upper bound on a configured year span.
pub const MAX_YEAR_SPAN: u32 = 200;

/// A make and the models offered for it, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeEntry {
    pub name: String,
    pub models: Vec<String>,
}

/// A part category and the common part names offered for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub parts: Vec<String>,
}

/// The enumerations every selection control draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    newest_year: i32,
    year_span: u32,
    makes: Vec<MakeEntry>,
    categories: Vec<CategoryEntry>,
}

impl Catalog {
    /// Build a catalog, rejecting empty sections and duplicate names.
    pub fn new(
        newest_year: i32,
        year_span: u32,
        makes: Vec<MakeEntry>,
        categories: Vec<CategoryEntry>,
    ) -> Result<Self> {
        check_year_range(newest_year, year_span)?;
        if makes.is_empty() {
            return Err(Error::EmptyCatalog("makes"));
        }
        if categories.is_empty() {
            return Err(Error::EmptyCatalog("categories"));
        }
        check_unique("make", makes.iter().map(|m| m.name.as_str()))?;
        check_unique("category", categories.iter().map(|c| c.name.as_str()))?;

        Ok(Self {
            newest_year,
            year_span,
            makes,
            categories,
        })
    }

    /// Built-in tables with years counting down from `newest_year`.
    pub fn builtin(newest_year: i32) -> Self {
        Self {
            newest_year,
            year_span: DEFAULT_YEAR_SPAN,
            makes: builtin_makes(),
            categories: builtin_categories(),
        }
    }

    /// Built-in tables anchored at the current calendar year.
    pub fn current() -> Self {
        Self::builtin(current_year())
    }

    pub fn with_year_range(mut self, newest_year: i32, year_span: u32) -> Result<Self> {
        check_year_range(newest_year, year_span)?;
        self.newest_year = newest_year;
        self.year_span = year_span;
        Ok(self)
    }

    pub fn newest_year(&self) -> i32 {
        self.newest_year
    }

    /// Years offered, newest first.
    pub fn years(&self) -> Vec<String> {
        (0..self.year_span)
            .map_while(|i| i32::try_from(i).ok())
            .map_while(|i| self.newest_year.checked_sub(i))
            .map(|y| y.to_string())
            .collect()
    }

    pub fn has_year(&self, year: &str) -> bool {
        match year.parse::<i32>() {
            Ok(y) => {
                let oldest = i32::try_from(self.year_span)
                    .ok()
                    .and_then(|span| self.newest_year.checked_sub(span));
                y.to_string() == year
                    && y <= self.newest_year
                    && oldest.map_or(true, |oldest| y > oldest)
            }
            Err(_) => false,
        }
    }

    pub fn makes(&self) -> impl Iterator<Item = &str> {
        self.makes.iter().map(|m| m.name.as_str())
    }

    pub fn make_entries(&self) -> &[MakeEntry] {
        &self.makes
    }

    /// Models for a make; empty for an unknown make.
    pub fn models(&self, make: &str) -> &[String] {
        self.makes
            .iter()
            .find(|m| m.name == make)
            .map(|m| m.models.as_slice())
            .unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn category_entries(&self) -> &[CategoryEntry] {
        &self.categories
    }

    /// Common part names for a category; empty for an unknown category.
    pub fn parts(&self, category: &str) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::current()
    }
}

pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

fn check_year_range(newest_year: i32, year_span: u32) -> Result<()> {
    let in_bounds = (1..=MAX_YEAR_SPAN).contains(&year_span)
        && i32::try_from(year_span)
            .ok()
            .and_then(|span| newest_year.checked_sub(span))
            .is_some();
    if in_bounds {
        Ok(())
    } else {
        Err(Error::InvalidYearSpan(year_span))
    }
}

fn check_unique<'a>(kind: &'static str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(Error::DuplicateEntry {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn entry(name: &str, items: &[&str]) -> (String, Vec<String>) {
    (
        name.to_string(),
        items.iter().map(|s| s.to_string()).collect(),
    )
}

fn builtin_makes() -> Vec<MakeEntry> {
    [
        entry("Dodge", &["Ram 1500", "Ram 2500", "Ram 3500", "Challenger", "Charger", "Durango"]),
        entry("Ford", &["F-150", "F-250", "F-350", "Mustang", "Explorer", "Escape"]),
        entry("Chevrolet", &["Silverado 1500", "Silverado 2500", "Camaro", "Equinox", "Tahoe"]),
        entry("Toyota", &["Camry", "Corolla", "RAV4", "Highlander", "Tacoma", "Tundra"]),
        entry("Honda", &["Civic", "Accord", "CR-V", "Pilot", "Ridgeline"]),
        entry("Nissan", &["Altima", "Sentra", "Rogue", "Pathfinder", "Titan"]),
        entry("GMC", &["Sierra 1500", "Sierra 2500", "Acadia", "Terrain", "Yukon"]),
        entry("Ram", &["1500", "2500", "3500", "ProMaster"]),
    ]
    .into_iter()
    .map(|(name, models)| MakeEntry { name, models })
    .collect()
}

fn builtin_categories() -> Vec<CategoryEntry> {
    [
        entry("Engine", &["Starter Motor", "Alternator", "Water Pump", "Oil Pump", "Timing Belt", "Spark Plugs"]),
        entry("Transmission", &["Transmission Filter", "Torque Converter", "Shift Solenoid", "Transmission Mount"]),
        entry("Electrical", &["Battery", "Ignition Coil", "Fuel Injector", "ECU", "Wiring Harness"]),
        entry("Suspension", &["Shock Absorber", "Strut", "Ball Joint", "Control Arm", "Sway Bar"]),
        entry("Brakes", &["Brake Pads", "Brake Rotors", "Brake Caliper", "Master Cylinder", "Brake Lines"]),
        entry("Cooling", &["Radiator", "Thermostat", "Cooling Fan", "Radiator Hose", "Water Pump"]),
        entry("Fuel System", &["Fuel Pump", "Fuel Filter", "Fuel Injector", "Fuel Tank", "Fuel Lines"]),
        entry("Exhaust", &["Catalytic Converter", "Muffler", "Exhaust Pipe", "O2 Sensor", "EGR Valve"]),
        entry("Body", &["Headlight", "Taillight", "Bumper", "Mirror", "Door Handle", "Fender"]),
        entry("Interior", &["Seat", "Dashboard", "Steering Wheel", "Door Panel", "Console"]),
    ]
    .into_iter()
    .map(|(name, parts)| CategoryEntry { name, parts })
    .collect()
}

/// The canonical interchange table, in display order.
pub fn canonical_results() -> Vec<CompatibleVehicle> {
    let row = |year: &str, make: &str, model: &str, confidence, pn: &str, notes: &str| {
        CompatibleVehicle {
            year: year.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            confidence,
            part_number: pn.to_string(),
            notes: Some(notes.to_string()),
        }
    };

    vec![
        row("2001", "Dodge", "Ram 1500", Confidence::High, "STM-1001-A", "Direct interchange - same OEM part number"),
        row("1999", "Dodge", "Ram 2500", Confidence::High, "STM-1001-A", "Compatible with 5.2L and 5.9L engines"),
        row("2000", "Dodge", "Dakota", Confidence::Medium, "STM-1001-B", "Different mounting but same electrical specs"),
        row("1998", "Jeep", "Grand Cherokee", Confidence::Medium, "STM-1002-A", "Compatible with 5.2L engine only"),
    ]
}
