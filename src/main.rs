//! # Tide Panel Application Entry Point
//!
//! This binary drives the library end-to-end: load configuration, fetch
//! station or prediction data from NOAA, run it through the parsers and
//! derivations, and render the result to the terminal.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{bail, Result};
use chrono::{Duration, Local};
use std::env;

use tide_panel_lib::config::Config;
use tide_panel_lib::favorites::{is_favorite, toggle_favorite, FavoritesStore};
use tide_panel_lib::noaa_api::NoaaClient;
use tide_panel_lib::renderer;
use tide_panel_lib::stations::{filter_stations, parse_station, StationFilter};
use tide_panel_lib::tides::{next_tides, parse_prediction, tide_range};

fn init_tracing() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_usage() {
    eprintln!("usage: tide-panel [command]");
    eprintln!();
    eprintln!("commands:");
    eprintln!("  panel [station-id]                       next tides for a station (default command)");
    eprintln!("  stations [all|primary|subordinate|favorites]");
    eprintln!("                                           list stations in the configured bounds");
    eprintln!("  favorite <station-id>                    toggle a station in the favorites list");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let config = Config::load();
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("panel") => show_panel(&config, args.get(1).map(String::as_str)).await,
        Some("stations") => list_stations(&config, args.get(1).map(String::as_str)).await,
        Some("favorite") => toggle(&config, args.get(1).map(String::as_str)),
        Some("help") | Some("--help") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            print_usage();
            bail!("unknown command: {other}");
        }
    }
}

/// Fetch predictions for the station and render the panel.
async fn show_panel(config: &Config, station_override: Option<&str>) -> Result<()> {
    let station_id = station_override.unwrap_or(config.station.id.as_str());
    let station_name = if station_override.is_some() {
        station_id
    } else {
        config.station.name.as_str()
    };

    // "now" is captured once here; everything below is pure.
    let now = Local::now();
    let begin_date = now.format("%Y%m%d").to_string();
    let end_date = (now + Duration::days(config.display.prediction_days))
        .format("%Y%m%d")
        .to_string();

    let client = NoaaClient::new();
    let raw = client
        .tide_predictions(station_id, &begin_date, &end_date)
        .await;
    let tides: Vec<_> = raw.iter().map(parse_prediction).collect();

    let upcoming = next_tides(&tides, now.naive_local(), config.display.tide_count);
    let range = tide_range(&tides);

    renderer::draw_panel(station_name, station_id, &upcoming, &range);
    Ok(())
}

/// Fetch stations in the configured bounds, filter, and list them.
async fn list_stations(config: &Config, filter_name: Option<&str>) -> Result<()> {
    let filter = match filter_name {
        Some(name) => StationFilter::from_name(name),
        None => config.display.filter,
    };

    let favorites = FavoritesStore::at_path(&config.favorites.path).load();

    let client = NoaaClient::new();
    let raw = client.stations_in_bounds(&config.map.bounds()).await;
    let stations: Vec<_> = raw.iter().map(parse_station).collect();

    let visible = filter_stations(&stations, filter, &favorites);
    renderer::draw_station_list(&visible, &favorites);
    Ok(())
}

/// Toggle a station in the favorites list and persist the result.
fn toggle(config: &Config, station_id: Option<&str>) -> Result<()> {
    let Some(station_id) = station_id else {
        print_usage();
        bail!("favorite requires a station id");
    };

    let store = FavoritesStore::at_path(&config.favorites.path);
    let updated = toggle_favorite(station_id, &store.load());
    store.save(&updated);

    if is_favorite(station_id, &updated) {
        println!("added {station_id} to favorites ({} total)", updated.len());
    } else {
        println!("removed {station_id} from favorites ({} total)", updated.len());
    }
    Ok(())
}
