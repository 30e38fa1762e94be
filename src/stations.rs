//! Station response parsing and the station-list filter.
//!
//! The MDAPI payload is handled as loose JSON rather than a derived struct:
//! coordinates arrive as strings or numbers depending on the endpoint
//! version, and a malformed record should degrade (NaN coordinates, empty
//! strings) instead of rejecting the whole list.

use crate::TideStation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which subset of the fetched stations the panel shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationFilter {
    /// Every station, input order preserved
    #[default]
    All,
    /// Reference stations only (`station_type == "R"`)
    Primary,
    /// Subordinate stations only (`station_type == "S"`)
    Subordinate,
    /// Stations whose id appears in the favorites list
    Favorites,
}

impl StationFilter {
    /// Map a filter name to a variant. Unrecognized names select [`All`],
    /// matching the panel's fallthrough behavior.
    ///
    /// [`All`]: StationFilter::All
    pub fn from_name(name: &str) -> Self {
        match name {
            "primary" => StationFilter::Primary,
            "subordinate" => StationFilter::Subordinate,
            "favorites" => StationFilter::Favorites,
            _ => StationFilter::All,
        }
    }
}

/// Parse a station-metadata response body into station records.
///
/// Returns an empty list when `body.stations` is missing or not an array.
pub fn parse_stations_response(body: &Value) -> Vec<TideStation> {
    match body.get("stations").and_then(Value::as_array) {
        Some(stations) => stations.iter().map(parse_station).collect(),
        None => Vec::new(),
    }
}

/// Map one raw station record to a [`TideStation`].
///
/// Missing or mistyped fields degrade per field: ids and names become empty
/// strings, coordinates become `NaN`, and the station type is dropped.
pub fn parse_station(raw: &Value) -> TideStation {
    TideStation {
        id: string_field(raw, "id"),
        name: string_field(raw, "name"),
        lat: coord_field(raw, "lat"),
        lon: coord_field(raw, "lng"),
        station_type: raw.get("type").and_then(Value::as_str).map(str::to_string),
    }
}

fn string_field(raw: &Value, field: &str) -> String {
    match raw.get(field) {
        Some(Value::String(text)) => text.clone(),
        // Some MDAPI responses carry numeric ids
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn coord_field(raw: &Value, field: &str) -> f64 {
    match raw.get(field) {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Select a subset of `stations`, preserving input order.
///
/// Type matching is strict: a station whose `station_type` is anything
/// other than exactly `"R"` or `"S"` is excluded by both the `Primary` and
/// `Subordinate` filters.
pub fn filter_stations(
    stations: &[TideStation],
    filter: StationFilter,
    favorites: &[String],
) -> Vec<TideStation> {
    match filter {
        StationFilter::All => stations.to_vec(),
        StationFilter::Primary => by_type(stations, "R"),
        StationFilter::Subordinate => by_type(stations, "S"),
        StationFilter::Favorites => stations
            .iter()
            .filter(|station| favorites.iter().any(|id| *id == station.id))
            .cloned()
            .collect(),
    }
}

fn by_type(stations: &[TideStation], station_type: &str) -> Vec<TideStation> {
    stations
        .iter()
        .filter(|station| station.station_type.as_deref() == Some(station_type))
        .cloned()
        .collect()
}
