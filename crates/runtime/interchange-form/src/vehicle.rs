//! Year / make / model selection with make → model cascade.

use std::str::FromStr;
use std::sync::Arc;

use interchange_core::{Catalog, Vehicle};

use crate::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleField {
    Year,
    Make,
    Model,
}

impl VehicleField {
    pub const ALL: [VehicleField; 3] = [VehicleField::Year, VehicleField::Make, VehicleField::Model];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleField::Year => "year",
            VehicleField::Make => "make",
            VehicleField::Model => "model",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleField::Year => "Year",
            VehicleField::Make => "Make",
            VehicleField::Model => "Model",
        }
    }

    /// Fields cleared when this one changes.
    pub fn dependents(self) -> &'static [VehicleField] {
        match self {
            VehicleField::Make => &[VehicleField::Model],
            VehicleField::Year | VehicleField::Model => &[],
        }
    }
}

impl FromStr for VehicleField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(VehicleField::Year),
            "make" => Ok(VehicleField::Make),
            "model" => Ok(VehicleField::Model),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Owns the three vehicle fields. An empty string means "not selected".
#[derive(Debug, Clone)]
pub struct VehicleSelector {
    catalog: Arc<Catalog>,
    year: String,
    make: String,
    model: String,
}

impl VehicleSelector {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            year: String::new(),
            make: String::new(),
            model: String::new(),
        }
    }

    /// Set one field, clear its dependents, and report the vehicle if all
    /// three fields are now set.
    ///
    /// Values not offered by [`options`](Self::options) are rejected and
    /// leave the selection untouched.
    pub fn select(&mut self, field: VehicleField, value: &str) -> Result<Option<Vehicle>, FormError> {
        if !self.options(field).iter().any(|o| o == value) {
            tracing::warn!(field = field.as_str(), value, "rejected vehicle choice");
            return Err(FormError::UnknownChoice {
                field: field.as_str(),
                value: value.to_string(),
            });
        }

        *self.slot_mut(field) = value.to_string();
        for dependent in field.dependents() {
            self.slot_mut(*dependent).clear();
        }

        let vehicle = self.vehicle();
        if let Some(v) = &vehicle {
            tracing::debug!(vehicle = %v, "vehicle selection changed");
        }
        Ok(vehicle)
    }

    /// The complete vehicle, or `None` while any field is empty.
    pub fn vehicle(&self) -> Option<Vehicle> {
        if self.year.is_empty() || self.make.is_empty() || self.model.is_empty() {
            return None;
        }
        Some(Vehicle::new(&self.year, &self.make, &self.model))
    }

    pub fn value(&self, field: VehicleField) -> &str {
        match field {
            VehicleField::Year => &self.year,
            VehicleField::Make => &self.make,
            VehicleField::Model => &self.model,
        }
    }

    /// Model is only selectable once a make is chosen.
    pub fn is_enabled(&self, field: VehicleField) -> bool {
        match field {
            VehicleField::Model => !self.make.is_empty(),
            VehicleField::Year | VehicleField::Make => true,
        }
    }

    /// Choices currently offered for `field`.
    pub fn options(&self, field: VehicleField) -> Vec<String> {
        match field {
            VehicleField::Year => self.catalog.years(),
            VehicleField::Make => self.catalog.makes().map(str::to_string).collect(),
            VehicleField::Model if self.make.is_empty() => Vec::new(),
            VehicleField::Model => self.catalog.models(&self.make).to_vec(),
        }
    }

    fn slot_mut(&mut self, field: VehicleField) -> &mut String {
        match field {
            VehicleField::Year => &mut self.year,
            VehicleField::Make => &mut self.make,
            VehicleField::Model => &mut self.model,
        }
    }
}
