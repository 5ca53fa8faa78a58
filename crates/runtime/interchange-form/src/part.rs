//! Category / part name / part number selection.

use std::str::FromStr;
use std::sync::Arc;

use interchange_core::{Catalog, PartQuery};

use crate::FormError;

/// Part-name sentinel selecting the free-text name field.
pub const CUSTOM_PART: &str = "custom";
pub const CUSTOM_PART_LABEL: &str = "Custom Part Name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartField {
    Category,
    Name,
    CustomName,
    PartNumber,
}

impl PartField {
    pub fn as_str(self) -> &'static str {
        match self {
            PartField::Category => "category",
            PartField::Name => "name",
            PartField::CustomName => "custom-name",
            PartField::PartNumber => "number",
        }
    }
}

impl FromStr for PartField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(PartField::Category),
            "name" => Ok(PartField::Name),
            "custom-name" => Ok(PartField::CustomName),
            "number" => Ok(PartField::PartNumber),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PartSearch {
    catalog: Arc<Catalog>,
    category: String,
    part: String,
    custom_name: String,
    part_number: String,
}

impl PartSearch {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            category: String::new(),
            part: String::new(),
            custom_name: String::new(),
            part_number: String::new(),
        }
    }

    /// Switch category. The part name is kept even when the new category
    /// does not list it.
    pub fn select_category(&mut self, value: &str) -> Result<(), FormError> {
        if !self.catalog.categories().any(|c| c == value) {
            tracing::warn!(value, "rejected part category");
            return Err(FormError::UnknownChoice {
                field: "category",
                value: value.to_string(),
            });
        }
        self.category = value.to_string();
        Ok(())
    }

    pub fn select_part(&mut self, value: &str) -> Result<(), FormError> {
        if !self.part_options().iter().any(|o| o == value) {
            tracing::warn!(value, category = %self.category, "rejected part name");
            return Err(FormError::UnknownChoice {
                field: "part",
                value: value.to_string(),
            });
        }
        self.part = value.to_string();
        Ok(())
    }

    pub fn set_custom_name(&mut self, name: impl Into<String>) {
        self.custom_name = name.into();
    }

    pub fn set_part_number(&mut self, number: impl Into<String>) {
        self.part_number = number.into();
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn part(&self) -> &str {
        &self.part
    }

    pub fn custom_name(&self) -> &str {
        &self.custom_name
    }

    pub fn part_number(&self) -> &str {
        &self.part_number
    }

    pub fn is_custom(&self) -> bool {
        self.part == CUSTOM_PART
    }

    /// The current category's part names plus the custom sentinel. Empty
    /// until a category is chosen.
    pub fn part_options(&self) -> Vec<String> {
        if self.category.is_empty() {
            return Vec::new();
        }
        let mut options = self.catalog.parts(&self.category).to_vec();
        options.push(CUSTOM_PART.to_string());
        options
    }

    pub fn category_options(&self) -> Vec<String> {
        self.catalog.categories().map(str::to_string).collect()
    }

    /// The name a search would use: free text under the custom sentinel,
    /// the catalog value otherwise.
    pub fn effective_name(&self) -> Option<&str> {
        let name = if self.is_custom() {
            self.custom_name.as_str()
        } else {
            self.part.as_str()
        };
        (!name.is_empty()).then_some(name)
    }

    /// Whether "Search Interchangeable Parts" is enabled.
    pub fn can_search(&self) -> bool {
        !self.category.is_empty() && self.effective_name().is_some()
    }

    /// The search request, or `None` while the action is disabled.
    pub fn request(&self) -> Option<PartQuery> {
        if self.category.is_empty() {
            return None;
        }
        let name = self.effective_name()?;
        let part_number = (!self.part_number.is_empty()).then(|| self.part_number.clone());

        Some(PartQuery {
            category: self.category.clone(),
            name: name.to_string(),
            part_number,
        })
    }
}
