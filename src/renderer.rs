//! # Panel Rendering
//!
//! Renders the tide panel and the station browser to the terminal. The
//! formatters here are the only place prediction timestamps and heights are
//! turned into display text; anything that does not parse is printed
//! verbatim rather than dropped.

use crate::favorites::is_favorite;
use crate::tides::parse_event_time;
use crate::{TideData, TideRange, TideStation};

/// Render the prediction panel: upcoming tide events plus the height range
/// across the fetched series.
pub fn draw_panel(station_name: &str, station_id: &str, next: &[TideData], range: &TideRange) {
    println!("{station_name} ({station_id})");

    if next.is_empty() {
        println!("  no upcoming tide predictions");
    }

    for tide in next {
        let marker = match tide.kind.as_str() {
            "H" => "▲ High",
            "L" => "▼ Low ",
            _ => "· Tide",
        };
        println!(
            "  {marker}  {:<15} {:>8}",
            format_event_time(&tide.time),
            format_height(&tide.height)
        );
    }

    println!("  range {:.1} to {:.1} ft MLLW", range.min, range.max);
}

/// Render the station browser listing.
///
/// Favorites are starred; the R/S station type is shown as a tag. Stations
/// with unparseable coordinates render as NaN rather than being hidden.
pub fn draw_station_list(stations: &[TideStation], favorites: &[String]) {
    for station in stations {
        let star = if is_favorite(&station.id, favorites) {
            '★'
        } else {
            ' '
        };
        let tag = station.station_type.as_deref().unwrap_or("-");
        println!(
            "{star} {:<9} {tag:<2} {:<32} ({:.4}, {:.4})",
            station.id, station.name, station.lat, station.lon
        );
    }
    println!("{} station(s)", stations.len());
}

/// Format a prediction timestamp like "Dec 15 8:00 AM".
///
/// Falls back to the verbatim string when it does not match the NOAA
/// layout.
pub fn format_event_time(time: &str) -> String {
    match parse_event_time(time) {
        Some(at) => at.format("%b %-d %-I:%M %p").to_string(),
        None => time.to_string(),
    }
}

/// Format a height string as feet with one decimal, verbatim on parse
/// failure.
pub fn format_height(height: &str) -> String {
    match height.trim().parse::<f64>() {
        Ok(feet) => format!("{feet:.1} ft"),
        Err(_) => height.to_string(),
    }
}
