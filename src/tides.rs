//! Prediction response parsing and tide derivation.
//!
//! Predictions arrive as `{ "t", "v", "type" }` records in chronological
//! order. The parser keeps timestamps and heights verbatim; [`next_tides`]
//! and [`tide_range`] parse them at the point of use.

use crate::{TideData, TideRange};
use chrono::NaiveDateTime;
use serde_json::Value;

/// Number of upcoming tide events the panel shows by default.
pub const DEFAULT_TIDE_COUNT: usize = 4;

/// Timestamp layout used by the predictions endpoint (station-local time).
const PREDICTION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a predictions response body into tide events.
///
/// Returns an empty list when `body.predictions` is missing or not an array.
pub fn parse_predictions(body: &Value) -> Vec<TideData> {
    match body.get("predictions").and_then(Value::as_array) {
        Some(predictions) => predictions.iter().map(parse_prediction).collect(),
        None => Vec::new(),
    }
}

/// Map one raw prediction record to a [`TideData`].
///
/// `t` and `v` are carried over verbatim; the event type passes through
/// without being checked against `"H"`/`"L"`.
pub fn parse_prediction(raw: &Value) -> TideData {
    TideData {
        kind: string_field(raw, "type"),
        time: string_field(raw, "t"),
        height: string_field(raw, "v"),
    }
}

fn string_field(raw: &Value, field: &str) -> String {
    match raw.get(field) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// Parse a prediction timestamp; `None` when it does not match the NOAA
/// layout.
pub(crate) fn parse_event_time(time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(time.trim(), PREDICTION_TIME_FORMAT).ok()
}

/// The next `count` tide events at or after `now`.
///
/// Input order is preserved (the series is assumed chronological) and
/// entries whose timestamp does not parse are treated as past. Fewer than
/// `count` qualifying events returns all of them; `count == 0` returns
/// nothing.
///
/// `now` is an explicit argument so the selection is a pure function of its
/// inputs; only the outermost caller should pass the wall clock.
pub fn next_tides(tides: &[TideData], now: NaiveDateTime, count: usize) -> Vec<TideData> {
    tides
        .iter()
        .filter(|tide| matches!(parse_event_time(&tide.time), Some(at) if at >= now))
        .take(count)
        .cloned()
        .collect()
}

/// Minimum and maximum height across a prediction series.
///
/// Heights that do not parse as numbers are skipped; an empty series (or
/// one with no parseable heights) yields `{ min: 0.0, max: 0.0 }`.
pub fn tide_range(tides: &[TideData]) -> TideRange {
    let heights: Vec<f64> = tides
        .iter()
        .filter_map(|tide| tide.height.trim().parse().ok())
        .collect();

    if heights.is_empty() {
        return TideRange { min: 0.0, max: 0.0 };
    }

    let (min, max) = heights
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &height| {
            (min.min(height), max.max(height))
        });

    TideRange { min, max }
}
