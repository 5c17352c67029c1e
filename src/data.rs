//! Dataset ingestion and normalization.
//!
//! The loader is deliberately forgiving: restaurant exports in the wild mix
//! encodings, stray quotes and ragged lines. A bad row is skipped, a bad
//! byte is decoded lossily, and a quote character is treated as data rather
//! than structure. Normalization then coerces the raw cells into a typed
//! table with defined defaults, so downstream modeling never has to reason
//! about missing or garbage values.

use crate::error::EngineError;
use csv::ReaderBuilder;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Identifier column.
pub const NAME_COLUMN: &str = "Restaurant Name";
/// Free-text category column.
pub const CUISINES_COLUMN: &str = "Cuisines";
/// City column, carried through for display.
pub const CITY_COLUMN: &str = "City";
/// Rating target column.
pub const RATING_COLUMN: &str = "Aggregate rating";
/// Vote count column.
pub const VOTES_COLUMN: &str = "Votes";
/// Cost column.
pub const COST_COLUMN: &str = "Average Cost for two";
/// Price tier column.
pub const PRICE_COLUMN: &str = "Price range";
/// Latitude column.
pub const LATITUDE_COLUMN: &str = "Latitude";
/// Longitude column.
pub const LONGITUDE_COLUMN: &str = "Longitude";

/// Placeholder category for rows with a missing or blank cuisine cell.
pub const UNKNOWN_CUISINE: &str = "Other";

/// One raw CSV row: trimmed column name mapped to the untouched cell text.
pub type RawRecord = HashMap<String, String>;

/// A single cleaned restaurant row.
///
/// After [`normalize`], every numeric field holds a finite value and
/// `cuisines` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub name: String,
    pub cuisines: String,
    pub city: String,
    pub aggregate_rating: f64,
    pub votes: f64,
    pub average_cost_for_two: f64,
    pub price_range: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Restaurant {
    /// Render the row back into its raw-table form (numeric fields become
    /// their display strings). Lets a caller re-feed an already-clean table
    /// through [`normalize`], which is a no-op on such input.
    pub fn to_raw(&self) -> RawRecord {
        let mut row = RawRecord::new();
        row.insert(NAME_COLUMN.to_string(), self.name.clone());
        row.insert(CUISINES_COLUMN.to_string(), self.cuisines.clone());
        row.insert(CITY_COLUMN.to_string(), self.city.clone());
        row.insert(RATING_COLUMN.to_string(), self.aggregate_rating.to_string());
        row.insert(VOTES_COLUMN.to_string(), self.votes.to_string());
        row.insert(COST_COLUMN.to_string(), self.average_cost_for_two.to_string());
        row.insert(PRICE_COLUMN.to_string(), self.price_range.to_string());
        row.insert(LATITUDE_COLUMN.to_string(), self.latitude.to_string());
        row.insert(LONGITUDE_COLUMN.to_string(), self.longitude.to_string());
        row
    }
}

/// Load a restaurant CSV into raw rows.
///
/// Column names are whitespace-trimmed and stripped of stray `"` characters.
/// Quoting is disabled so embedded quotes never shift field boundaries, and
/// rows that fail to parse or whose field count does not match the header
/// are skipped rather than failing the whole load. Cell bytes are decoded
/// lossily, so non-UTF8 input is tolerated.
///
/// A missing or unreadable file is an error; a file with headers and no
/// rows loads successfully as an empty table.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>, EngineError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(file);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().replace('"', ""))
        .collect();

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = match record {
            Ok(record) => record,
            Err(_) => continue, // unparseable line: skip, keep loading
        };
        if record.len() != headers.len() {
            continue;
        }
        let mut row = RawRecord::with_capacity(headers.len());
        for (name, cell) in headers.iter().zip(record.iter()) {
            row.insert(name.clone(), String::from_utf8_lossy(cell).into_owned());
        }
        rows.push(row);
    }

    Ok(rows)
}

// Column names arriving from the loader are already trimmed, but normalize
// accepts arbitrary raw rows, so lookups go through a trimmed-key view.
fn trimmed_view(row: &RawRecord) -> HashMap<&str, &str> {
    row.iter().map(|(k, v)| (k.trim(), v.as_str())).collect()
}

fn numeric_cell(row: &HashMap<&str, &str>, column: &str) -> f64 {
    row.get(column)
        .and_then(|cell| cell.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn text_cell(row: &HashMap<&str, &str>, column: &str) -> String {
    row.get(column).map(|cell| cell.to_string()).unwrap_or_default()
}

/// Coerce raw rows into the typed table.
///
/// Each declared numeric column is parsed as a float; a missing cell, a
/// parse failure or a non-finite value degrades to `0.0` and never raises.
/// A missing or blank cuisine cell becomes [`UNKNOWN_CUISINE`]; all other
/// text is carried through untouched. Row count and order are preserved and
/// the input is not mutated.
pub fn normalize(rows: &[RawRecord]) -> Vec<Restaurant> {
    rows.iter()
        .map(|raw| {
            let row = trimmed_view(raw);
            let cuisines = text_cell(&row, CUISINES_COLUMN);
            Restaurant {
                name: text_cell(&row, NAME_COLUMN),
                cuisines: if cuisines.trim().is_empty() {
                    UNKNOWN_CUISINE.to_string()
                } else {
                    cuisines
                },
                city: text_cell(&row, CITY_COLUMN),
                aggregate_rating: numeric_cell(&row, RATING_COLUMN),
                votes: numeric_cell(&row, VOTES_COLUMN),
                average_cost_for_two: numeric_cell(&row, COST_COLUMN),
                price_range: numeric_cell(&row, PRICE_COLUMN),
                latitude: numeric_cell(&row, LATITUDE_COLUMN),
                longitude: numeric_cell(&row, LONGITUDE_COLUMN),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_numeric_garbage_degrades_to_zero() {
        let rows = vec![raw_row(&[
            (NAME_COLUMN, "Cafe Mondo"),
            (CUISINES_COLUMN, "Cafe"),
            (VOTES_COLUMN, "N/A"),
            (RATING_COLUMN, "4..2"),
            (COST_COLUMN, ""),
            (PRICE_COLUMN, "two"),
        ])];
        let clean = normalize(&rows);
        assert_eq!(clean[0].votes, 0.0);
        assert_eq!(clean[0].aggregate_rating, 0.0);
        assert_eq!(clean[0].average_cost_for_two, 0.0);
        assert_eq!(clean[0].price_range, 0.0);
        // Latitude/Longitude were absent entirely
        assert_eq!(clean[0].latitude, 0.0);
        assert_eq!(clean[0].longitude, 0.0);
    }

    #[test]
    fn test_all_numeric_fields_finite() {
        let rows = vec![raw_row(&[
            (NAME_COLUMN, "Infinity Grill"),
            (VOTES_COLUMN, "inf"),
            (RATING_COLUMN, "NaN"),
            (COST_COLUMN, "-inf"),
        ])];
        let clean = normalize(&rows);
        assert!(clean[0].votes.is_finite());
        assert!(clean[0].aggregate_rating.is_finite());
        assert!(clean[0].average_cost_for_two.is_finite());
    }

    #[test]
    fn test_missing_cuisine_becomes_other() {
        let rows = vec![
            raw_row(&[(NAME_COLUMN, "A"), (CUISINES_COLUMN, "")]),
            raw_row(&[(NAME_COLUMN, "B"), (CUISINES_COLUMN, "   ")]),
            raw_row(&[(NAME_COLUMN, "C")]),
            raw_row(&[(NAME_COLUMN, "D"), (CUISINES_COLUMN, "North Indian, Chinese")]),
        ];
        let clean = normalize(&rows);
        assert_eq!(clean[0].cuisines, UNKNOWN_CUISINE);
        assert_eq!(clean[1].cuisines, UNKNOWN_CUISINE);
        assert_eq!(clean[2].cuisines, UNKNOWN_CUISINE);
        assert_eq!(clean[3].cuisines, "North Indian, Chinese");
    }

    #[test]
    fn test_untrimmed_column_names_still_resolve() {
        let rows = vec![raw_row(&[(" Votes ", "7"), ("Restaurant Name", "Padded")])];
        let clean = normalize(&rows);
        assert_eq!(clean[0].votes, 7.0);
        assert_eq!(clean[0].name, "Padded");
    }

    #[test]
    fn test_row_count_and_order_preserved() {
        let rows: Vec<RawRecord> = (0..5)
            .map(|i| raw_row(&[(NAME_COLUMN, &format!("R{}", i)), (VOTES_COLUMN, "1")]))
            .collect();
        let clean = normalize(&rows);
        assert_eq!(clean.len(), 5);
        for (i, restaurant) in clean.iter().enumerate() {
            assert_eq!(restaurant.name, format!("R{}", i));
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let rows = vec![
            raw_row(&[
                (NAME_COLUMN, "Spice Route"),
                (CUISINES_COLUMN, "Thai"),
                (CITY_COLUMN, "Bangkok"),
                (RATING_COLUMN, "4.4"),
                (VOTES_COLUMN, "junk"),
                (COST_COLUMN, "850"),
                (PRICE_COLUMN, "3"),
                (LATITUDE_COLUMN, "13.75"),
                (LONGITUDE_COLUMN, "100.5"),
            ]),
            raw_row(&[(NAME_COLUMN, "Nameless"), (CUISINES_COLUMN, "")]),
        ];
        let once = normalize(&rows);
        let raw_again: Vec<RawRecord> = once.iter().map(|r| r.to_raw()).collect();
        let twice = normalize(&raw_again);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_load_skips_ragged_rows_and_tolerates_bad_bytes() {
        // second data line has a trailing extra field, third has latin-1
        // bytes (0xE9) in the name and an embedded quote in the cuisine cell
        let mut data: Vec<u8> = Vec::new();
        data.extend_from_slice(b" Restaurant Name ,Cuisines,Votes\n");
        data.extend_from_slice(b"Plain Diner,American,12\n");
        data.extend_from_slice(b"Broken,Row,3,EXTRA\n");
        data.extend_from_slice(b"Caf\xe9 Ol\xe9,\"Tapas,7\n");

        let path = std::env::temp_dir().join("resto_engine_loader_test.csv");
        std::fs::write(&path, &data).unwrap();
        let rows = load_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(rows.len(), 2);
        // header whitespace stripped
        assert_eq!(rows[0].get(NAME_COLUMN).unwrap(), "Plain Diner");
        // lossy decode keeps the row instead of dropping it
        assert!(rows[1].get(NAME_COLUMN).unwrap().contains("Caf"));
        // the quote is data, not structure: the field count still matched
        assert_eq!(rows[1].get(CUISINES_COLUMN).unwrap(), "\"Tapas");
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(load_csv("definitely/not/here.csv").is_err());
    }
}
