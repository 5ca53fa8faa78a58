//! Reference data loading.
//!
//! A data file may carry any of `makes`, `categories` and `results`; missing
//! sections fall back to the built-in tables.

use interchange_core::catalog::current_year;
use interchange_core::{canonical_results, Catalog, CategoryEntry, CompatibleVehicle, MakeEntry};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{CatalogConfig, ConfigError, Result};

/// On-disk shape of a data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub makes: Option<Vec<MakeEntry>>,
    #[serde(default)]
    pub categories: Option<Vec<CategoryEntry>>,
    #[serde(default)]
    pub results: Option<Vec<CompatibleVehicle>>,
}

impl DataFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
            Some("json") => serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            }),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Catalog plus the canonical interchange table.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub catalog: Catalog,
    pub results: Vec<CompatibleVehicle>,
}

impl Dataset {
    pub fn load(config: &CatalogConfig) -> Result<Self> {
        let newest = config.newest_year.unwrap_or_else(current_year);
        let builtin = Catalog::builtin(newest);

        let Some(path) = &config.data_file else {
            return Ok(Self {
                catalog: builtin.with_year_range(newest, config.year_span)?,
                results: canonical_results(),
            });
        };

        let file = DataFile::from_path(path)?;
        let catalog = Catalog::new(
            newest,
            config.year_span,
            file.makes.unwrap_or_else(|| builtin.make_entries().to_vec()),
            file.categories.unwrap_or_else(|| builtin.category_entries().to_vec()),
        )?;
        let results = file.results.unwrap_or_else(canonical_results);

        tracing::info!(
            path = %path.display(),
            makes = catalog.make_entries().len(),
            categories = catalog.category_entries().len(),
            results = results.len(),
            "loaded data file"
        );

        Ok(Self { catalog, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interchange_core::Confidence;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("interchange_data_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn builtin_when_no_file() {
        let config = CatalogConfig {
            newest_year: Some(2024),
            ..CatalogConfig::default()
        };
        let dataset = Dataset::load(&config).unwrap();
        assert_eq!(dataset.catalog.years().len(), 35);
        assert_eq!(dataset.results, canonical_results());
    }

    #[test]
    fn yaml_file_replaces_sections() {
        let path = temp_file(
            "data.yaml",
            r#"
makes:
  - name: Jeep
    models: [Wrangler, Grand Cherokee]
results:
  - year: "1998"
    make: Jeep
    model: Grand Cherokee
    confidence: low
    part_number: ALT-9
"#,
        );
        let config = CatalogConfig {
            newest_year: Some(2000),
            year_span: 5,
            data_file: Some(path.clone()),
        };
        let dataset = Dataset::load(&config).unwrap();

        assert_eq!(dataset.catalog.makes().collect::<Vec<_>>(), ["Jeep"]);
        assert_eq!(dataset.catalog.parts("Engine")[0], "Starter Motor");
        assert_eq!(dataset.catalog.years(), ["2000", "1999", "1998", "1997", "1996"]);
        assert_eq!(dataset.results.len(), 1);
        assert_eq!(dataset.results[0].confidence, Confidence::Low);
        assert!(dataset.results[0].notes.is_none());

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn json_file_is_accepted() {
        let path = temp_file(
            "data.json",
            r#"{"categories": [{"name": "Lighting", "parts": ["Headlight"]}]}"#,
        );
        let config = CatalogConfig {
            newest_year: Some(2024),
            data_file: Some(path.clone()),
            ..CatalogConfig::default()
        };
        let dataset = Dataset::load(&config).unwrap();
        assert_eq!(dataset.catalog.categories().collect::<Vec<_>>(), ["Lighting"]);
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn unknown_extension_rejected() {
        let path = temp_file("data.toml", "makes = []");
        let err = DataFile::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn empty_section_fails_validation() {
        let path = temp_file("data.yaml", "makes: []\n");
        let config = CatalogConfig {
            data_file: Some(path.clone()),
            ..CatalogConfig::default()
        };
        let err = Dataset::load(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Catalog(interchange_core::Error::EmptyCatalog("makes"))
        ));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn oversized_year_span_rejected() {
        let config = CatalogConfig {
            newest_year: Some(2024),
            year_span: u32::MAX,
            data_file: None,
        };
        let err = Dataset::load(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Catalog(interchange_core::Error::InvalidYearSpan(u32::MAX))
        ));
    }
}
