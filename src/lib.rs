//! # Tide Panel Core Library
//!
//! This library holds the data core of the tide panel: fetching station and
//! prediction payloads from the NOAA CO-OPS services, normalizing them into
//! typed records, filtering stations, deriving the next high/low tide events,
//! and persisting the user's favorite-station list.
//!
//! ## Design Philosophy
//!
//! ### Fail soft to empty
//! The panel must never go blank because the network hiccuped. Every public
//! operation in this crate is total from the caller's perspective: a failed
//! fetch, an undecodable body, or a corrupt favorites file degrades to an
//! empty result, with the underlying cause reported on the `tracing`
//! diagnostic channel. Error types exist only inside the client, below that
//! boundary.
//!
//! ### Strings stay strings
//! NOAA delivers timestamps and heights as strings, and the records keep
//! them verbatim. Parsing happens at the point of use only: coordinates when
//! a station record is built, timestamps when upcoming events are selected,
//! heights when the min/max range is computed or a value is rendered.
//!
//! ### Injected state
//! The only stateful pieces are explicit: the favorites store takes its
//! backing file as a parameter, and the next-tide derivation takes "now" as
//! an argument. Everything else is a pure transform over its inputs.
//!
//! ## Data Flow
//!
//! 1. **Fetch**: [`noaa_api::NoaaClient`] pulls raw station or prediction
//!    records for a bounding box or station/date window
//! 2. **Parse**: [`stations`] and [`tides`] map raw JSON into [`TideStation`]
//!    and [`TideData`]
//! 3. **Select**: [`stations::filter_stations`] narrows the station list;
//!    [`tides::next_tides`] and [`tides::tide_range`] derive what the panel
//!    shows
//! 4. **Persist**: [`favorites::FavoritesStore`] round-trips the favorite
//!    station ids between sessions

use serde::{Deserialize, Serialize};

// Module declarations
pub mod config;
pub mod favorites;
pub mod noaa_api;
pub mod renderer;
pub mod stations;
pub mod tides;

/// A NOAA tide station as shown in the station browser.
///
/// Coordinates are parsed when the record is built; a malformed `lat`/`lng`
/// in the source payload yields `NaN` rather than dropping the station, so
/// consumers must tolerate `NaN` coordinates.
///
/// # Example
/// ```
/// use tide_panel_lib::TideStation;
///
/// let station = TideStation {
///     id: "8418150".to_string(),
///     name: "Portland".to_string(),
///     lat: 43.6567,
///     lon: -70.2467,
///     station_type: Some("R".to_string()),
/// };
///
/// assert_eq!(station.station_type.as_deref(), Some("R"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideStation {
    /// NOAA station identifier, treated as an opaque string key
    pub id: String,
    /// Human-readable station name
    pub name: String,
    /// Latitude in degrees (`NaN` when the source value was malformed)
    pub lat: f64,
    /// Longitude in degrees (`NaN` when the source value was malformed)
    pub lon: f64,
    /// `"R"` for reference (primary) stations, `"S"` for subordinate ones.
    /// Other values pass through unvalidated and match neither filter.
    pub station_type: Option<String>,
}

/// A single predicted high or low tide event.
///
/// `time` and `height` are kept exactly as the predictions endpoint sent
/// them. `kind` is `"H"` or `"L"` in well-formed payloads but is not
/// validated here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideData {
    /// Event kind as reported by NOAA (`"H"` high, `"L"` low)
    #[serde(rename = "type")]
    pub kind: String,
    /// Event timestamp in station-local time, source format preserved
    pub time: String,
    /// Predicted height in feet above MLLW, kept as a string
    pub height: String,
}

/// A geographic bounding box in degrees.
///
/// Caller-supplied and unvalidated: no check that `north > south` or
/// `east > west` is performed here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Minimum and maximum predicted height across a prediction series, in feet.
///
/// An empty series yields `{ min: 0.0, max: 0.0 }` so the panel's axis
/// always has something to anchor to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TideRange {
    pub min: f64,
    pub max: f64,
}
