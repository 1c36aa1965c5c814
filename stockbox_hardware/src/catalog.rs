//! Product catalog JSON parsing and the local file source.
//!
//! The remote database returns an object keyed by record id. Integer keys
//! sort numerically and come before the others, which sort as strings
//! (push ids sort chronologically). Dense integer keys may instead arrive
//! as an array with `null` holes. Both map to an ordered list of entries.
//! Any malformed entry fails the whole document.

use std::cmp::Ordering;

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use stockbox_traits::{CatalogEntry, CatalogSource};

use crate::error::{HwError, Result};

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(alias = "nom", alias = "name")]
    designation: String,
    #[serde(alias = "unitWeight", alias = "poids_unitaire")]
    unit_weight: f32,
    #[serde(alias = "unitsPerLot", alias = "unites_par_lot")]
    units_per_lot: u32,
}

fn entry_from_value(key: &str, v: Value) -> Result<CatalogEntry> {
    let raw: RawEntry =
        serde_json::from_value(v).map_err(|e| HwError::Parse(format!("entry {key}: {e}")))?;
    let designation = raw.designation.trim().to_string();
    if designation.is_empty() {
        return Err(HwError::Parse(format!("entry {key}: empty designation")));
    }
    if !(raw.unit_weight.is_finite() && raw.unit_weight >= 0.0) {
        return Err(HwError::Parse(format!(
            "entry {key}: unit_weight must be a finite, non-negative number"
        )));
    }
    Ok(CatalogEntry {
        designation,
        unit_weight: raw.unit_weight,
        units_per_lot: raw.units_per_lot,
    })
}

fn key_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Parse a catalog document into ordered entries.
pub fn parse_catalog_json(text: &str) -> Result<Vec<CatalogEntry>> {
    let doc: Value = serde_json::from_str(text).map_err(|e| HwError::Parse(e.to_string()))?;
    match doc {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => {
            let mut pairs: Vec<(String, Value)> = map.into_iter().collect();
            pairs.sort_by(|a, b| key_order(&a.0, &b.0));
            pairs
                .into_iter()
                .map(|(k, v)| entry_from_value(&k, v))
                .collect()
        }
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| entry_from_value(&i.to_string(), v))
            .collect(),
        other => Err(HwError::Parse(format!(
            "expected an object or array of entries, got {}",
            kind_name(&other)
        ))),
    }
}

fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Catalog read from a JSON file on disk, re-read on every fetch.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    fn fetch_all(
        &mut self,
    ) -> std::result::Result<Vec<CatalogEntry>, Box<dyn std::error::Error + Send + Sync>> {
        let text = std::fs::read_to_string(&self.path).map_err(HwError::from)?;
        let entries = parse_catalog_json(&text)?;
        tracing::debug!(path = %self.path.display(), count = entries.len(), "catalog file read");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_entries_are_ordered_by_key() {
        let text = r#"{
            "-N2": {"designation": "Lait", "unit_weight": 1000, "units_per_lot": 6},
            "-N1": {"designation": "Yaourt", "unit_weight": 125.5, "units_per_lot": 12}
        }"#;
        let entries = parse_catalog_json(text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].designation, "Yaourt");
        assert_eq!(entries[1].designation, "Lait");
        assert_eq!(entries[0].unit_weight, 125.5);
    }

    #[test]
    fn integer_keys_sort_numerically_before_other_keys() {
        let text = r#"{
            "10": {"designation": "Dix", "unit_weight": 10, "units_per_lot": 1},
            "2": {"designation": "Deux", "unit_weight": 2, "units_per_lot": 1}
        }"#;
        let names: Vec<String> = parse_catalog_json(text)
            .unwrap()
            .into_iter()
            .map(|e| e.designation)
            .collect();
        assert_eq!(names, ["Deux", "Dix"]);

        let mixed = r#"{
            "-N1": {"designation": "Push", "unit_weight": 1, "units_per_lot": 1},
            "10": {"designation": "Dix", "unit_weight": 10, "units_per_lot": 1},
            "9": {"designation": "Neuf", "unit_weight": 9, "units_per_lot": 1}
        }"#;
        let names: Vec<String> = parse_catalog_json(mixed)
            .unwrap()
            .into_iter()
            .map(|e| e.designation)
            .collect();
        assert_eq!(names, ["Neuf", "Dix", "Push"]);
    }

    #[test]
    fn array_with_holes_and_aliases() {
        let text = r#"[null,
            {"nom": "Beurre", "poids_unitaire": 250, "unites_par_lot": 20},
            {"designation": "Fromage", "unitWeight": 200, "unitsPerLot": 10}]"#;
        let entries = parse_catalog_json(text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].designation, "Beurre");
        assert_eq!(entries[1].units_per_lot, 10);
    }

    #[test]
    fn null_document_is_an_empty_catalog() {
        assert!(parse_catalog_json("null").unwrap().is_empty());
    }

    #[test]
    fn one_bad_entry_fails_the_whole_document() {
        let text = r#"{
            "a": {"designation": "Ok", "unit_weight": 1, "units_per_lot": 1},
            "b": {"designation": "Bad", "unit_weight": "heavy", "units_per_lot": 1}
        }"#;
        let err = parse_catalog_json(text).unwrap_err();
        assert!(matches!(err, HwError::Parse(ref m) if m.contains("entry b")));
    }

    #[test]
    fn rejects_blank_designation_and_negative_weight() {
        assert!(parse_catalog_json(r#"[{"designation": " ", "unit_weight": 1, "units_per_lot": 1}]"#).is_err());
        assert!(parse_catalog_json(r#"[{"designation": "X", "unit_weight": -1, "units_per_lot": 1}]"#).is_err());
    }

    #[test]
    fn rejects_malformed_json_and_scalars() {
        assert!(matches!(parse_catalog_json("{"), Err(HwError::Parse(_))));
        let err = parse_catalog_json("42").unwrap_err();
        assert!(err.to_string().contains("got a number"));
    }
}
