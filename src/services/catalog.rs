use crate::models::City;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Embedded geographic reference dataset, consumed once at startup
const EMBEDDED_CITIES: &str = include_str!("../../data/cities.json");

/// Errors while loading the city catalog. Both variants are fatal startup
/// conditions; catalog loading is never retried.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("geographic reference data unavailable: {0}")]
    DataUnavailable(#[from] std::io::Error),

    #[error("geographic reference data malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Load the embedded reference set, filtered to a population floor.
///
/// Deterministic given the same backing data: cities below `min_population`
/// are dropped, labels are deduplicated last-write-wins, and the result is
/// sorted by label.
pub fn load_catalog(min_population: u64) -> Result<Vec<City>, CatalogError> {
    parse_catalog(EMBEDDED_CITIES, min_population)
}

/// Load a catalog from a JSON file with the same schema as the embedded set
pub fn load_catalog_from<P: AsRef<Path>>(
    path: P,
    min_population: u64,
) -> Result<Vec<City>, CatalogError> {
    let raw = std::fs::read_to_string(path)?;
    parse_catalog(&raw, min_population)
}

fn parse_catalog(raw: &str, min_population: u64) -> Result<Vec<City>, CatalogError> {
    let cities: Vec<City> = serde_json::from_str(raw)?;

    // Keyed by label: duplicate "Name, CC" entries resolve last-write-wins,
    // and the BTreeMap gives us label-sorted output for free
    let mut by_label: BTreeMap<String, City> = BTreeMap::new();
    for city in cities {
        if city.population < min_population {
            continue;
        }
        by_label.insert(city.label(), city);
    }

    Ok(by_label.into_values().collect())
}

/// Look up a catalog city by its label
pub fn find_city<'a>(catalog: &'a [City], label: &str) -> Option<&'a City> {
    catalog.iter().find(|c| c.label() == label)
}
