//! In-memory province/city cache seeded from the Georef API at startup.
//!
//! One bulk request fetches every locality in the country; they are grouped
//! by province name and held immutably for the lifetime of the process. A
//! failed fetch logs a warning and leaves the cache empty rather than
//! failing startup, so geo autocomplete degrades gracefully.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct LocalitiesResponse {
    #[serde(default)]
    localidades: Vec<Locality>,
}

#[derive(Debug, Deserialize)]
struct Locality {
    nombre: String,
    provincia: Option<Province>,
}

#[derive(Debug, Deserialize)]
struct Province {
    nombre: Option<String>,
}

/// Immutable province -> sorted city names map.
#[derive(Debug, Default)]
pub struct GeoCache {
    provinces: BTreeMap<String, Vec<String>>,
}

impl GeoCache {
    /// An empty cache; every lookup returns no results.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fetch all localities from the Georef API and build the cache.
    ///
    /// Returns an empty cache on any network or decode failure.
    pub async fn load(client: &reqwest::Client, base_url: &str) -> Self {
        let url = format!("{base_url}/localidades?max=5000&campos=id,nombre,provincia.nombre");

        let response = match client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "Georef fetch failed, geo cache left empty");
                return Self::empty();
            }
        };

        let payload: LocalitiesResponse = match response.json().await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "Georef decode failed, geo cache left empty");
                return Self::empty();
            }
        };

        let cache = Self::from_localities(payload.localidades);
        tracing::info!(provinces = cache.provinces.len(), "Geo cache loaded");
        cache
    }

    /// Group localities by province name; cities are sorted within each
    /// province and provinces iterate alphabetically.
    fn from_localities(localities: Vec<Locality>) -> Self {
        let mut provinces: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for locality in localities {
            let Some(province_name) = locality.provincia.and_then(|p| p.nombre) else {
                continue;
            };
            provinces.entry(province_name).or_default().push(locality.nombre);
        }

        for cities in provinces.values_mut() {
            cities.sort();
        }

        Self { provinces }
    }

    /// Province names in alphabetical order.
    pub fn provinces(&self) -> Vec<String> {
        self.provinces.keys().cloned().collect()
    }

    /// City names for a province, sorted. Unknown provinces yield an empty
    /// list rather than an error.
    pub fn cities(&self, province: &str) -> Vec<String> {
        self.provinces.get(province).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locality(city: &str, province: Option<&str>) -> Locality {
        Locality {
            nombre: city.to_string(),
            provincia: province.map(|name| Province {
                nombre: Some(name.to_string()),
            }),
        }
    }

    #[test]
    fn groups_cities_by_province_sorted() {
        let cache = GeoCache::from_localities(vec![
            locality("Rosario", Some("Santa Fe")),
            locality("Bariloche", Some("Río Negro")),
            locality("Funes", Some("Santa Fe")),
        ]);

        assert_eq!(cache.provinces(), vec!["Río Negro", "Santa Fe"]);
        assert_eq!(cache.cities("Santa Fe"), vec!["Funes", "Rosario"]);
    }

    #[test]
    fn localities_without_province_are_skipped() {
        let cache = GeoCache::from_localities(vec![
            locality("Orphan", None),
            locality("Córdoba", Some("Córdoba")),
        ]);

        assert_eq!(cache.provinces(), vec!["Córdoba"]);
    }

    #[test]
    fn unknown_province_yields_empty_list() {
        let cache = GeoCache::empty();
        assert!(cache.provinces().is_empty());
        assert!(cache.cities("Mendoza").is_empty());
    }
}
