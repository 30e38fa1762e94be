//! # NOAA CO-OPS API Client
//!
//! This module owns all network operations: fetching station metadata by
//! bounding box from the MDAPI service and fetching high/low tide
//! predictions from the datagetter service.
//!
//! ## Data Sources
//!
//! ### Station metadata (MDAPI)
//! - **URL**: `https://api.tidesandcurrents.noaa.gov/mdapi/prod/webapi/stations.json`
//! - **Query**: `latlonBBox={south},{west},{north},{east}` (that exact order)
//! - **Body**: `{ "stations": [ { "id", "name", "lat", "lng", "type" }, ... ] }`
//!
//! ### Tide predictions (datagetter)
//! - **URL**: `https://api.tidesandcurrents.noaa.gov/api/prod/datagetter`
//! - **Query**: `product=predictions`, MLLW datum, english units, `hilo`
//!   interval, local station time zone, JSON output, plus the caller's
//!   station id and `YYYYMMDD` date window embedded verbatim
//! - **Body**: `{ "predictions": [ { "t", "v", "type" }, ... ] }`
//!
//! ## Failure Contract
//!
//! The panel consuming this client must never be blocked by a bad request.
//! Transport failures, non-success HTTP statuses, and undecodable bodies are
//! all swallowed here: the fetchers log a `tracing` warning and return an
//! empty list. [`FetchError`] classifies those failures for the log line but
//! never crosses the public boundary.
//!
//! No retries, timeouts, or caching are layered on top of the transport;
//! one call maps to one request.

use crate::Bounds;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Base URL of the station-metadata service.
const METADATA_BASE: &str = "https://api.tidesandcurrents.noaa.gov/mdapi/prod/webapi";

/// Base URL of the data-retrieval service.
const DATAGETTER_BASE: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";

/// Failure modes of a single fetch, in the order they can occur.
///
/// Internal to the client: public fetchers translate every variant into an
/// empty result plus a diagnostic log line.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never completed (DNS, connection, protocol error)
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not valid JSON
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Client for the two NOAA CO-OPS endpoints.
///
/// Holds a reusable `reqwest::Client`; both base URLs can be redirected for
/// test isolation via [`NoaaClient::with_base_urls`].
pub struct NoaaClient {
    http: reqwest::Client,
    metadata_base: String,
    datagetter_base: String,
}

impl Default for NoaaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NoaaClient {
    /// Client pointed at the production NOAA services.
    pub fn new() -> Self {
        Self::with_base_urls(METADATA_BASE, DATAGETTER_BASE)
    }

    /// Client pointed at alternate endpoints.
    pub fn with_base_urls(
        metadata_base: impl Into<String>,
        datagetter_base: impl Into<String>,
    ) -> Self {
        NoaaClient {
            http: reqwest::Client::new(),
            metadata_base: metadata_base.into(),
            datagetter_base: datagetter_base.into(),
        }
    }

    /// Request URL for the stations inside `bounds`.
    ///
    /// The bounding box is serialized as `south,west,north,east`, which is
    /// the order the MDAPI expects regardless of how `Bounds` is laid out.
    pub fn stations_url(&self, bounds: &Bounds) -> String {
        format!(
            "{}/stations.json?latlonBBox={},{},{},{}",
            self.metadata_base, bounds.south, bounds.west, bounds.north, bounds.east
        )
    }

    /// Request URL for high/low predictions at a station over a date window.
    ///
    /// `begin_date`/`end_date` are expected in `YYYYMMDD` form and, like the
    /// station id, are embedded verbatim without validation or escaping.
    pub fn predictions_url(&self, station_id: &str, begin_date: &str, end_date: &str) -> String {
        format!(
            "{}?product=predictions&application=NOS.COOPS.TAC.WL\
             &begin_date={begin_date}&end_date={end_date}&datum=MLLW\
             &station={station_id}&time_zone=lst_ldt&units=english\
             &interval=hilo&format=json",
            self.datagetter_base
        )
    }

    /// Fetch the raw station records inside `bounds`.
    ///
    /// Returns the `stations` array of the response body, or an empty list
    /// if the request failed in any way (logged, never propagated).
    pub async fn stations_in_bounds(&self, bounds: &Bounds) -> Vec<Value> {
        let url = self.stations_url(bounds);
        match self.get_json(&url).await {
            Ok(body) => array_field(&body, "stations"),
            Err(err) => {
                warn!(%url, error = %err, "station fetch failed, returning no stations");
                Vec::new()
            }
        }
    }

    /// Fetch the raw high/low prediction records for a station.
    ///
    /// Returns the `predictions` array of the response body, or an empty
    /// list if the request failed in any way (logged, never propagated).
    pub async fn tide_predictions(
        &self,
        station_id: &str,
        begin_date: &str,
        end_date: &str,
    ) -> Vec<Value> {
        let url = self.predictions_url(station_id, begin_date, end_date);
        match self.get_json(&url).await {
            Ok(body) => array_field(&body, "predictions"),
            Err(err) => {
                warn!(%url, error = %err, "prediction fetch failed, returning no predictions");
                Vec::new()
            }
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.http.get(url).send().await.map_err(FetchError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        response.json().await.map_err(FetchError::Decode)
    }
}

/// Extract a named array field from a decoded body, defaulting to empty.
fn array_field(body: &Value, field: &str) -> Vec<Value> {
    match body.get(field).and_then(Value::as_array) {
        Some(records) => records.clone(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_bounds() -> Bounds {
        Bounds {
            north: 42.0,
            south: 40.0,
            east: -70.0,
            west: -72.0,
        }
    }

    #[test]
    fn stations_url_orders_bbox_south_west_north_east() {
        let client = NoaaClient::new();
        let url = client.stations_url(&test_bounds());

        assert!(
            url.contains("latlonBBox=40,-72,42,-70"),
            "bbox should be south,west,north,east: {url}"
        );
        assert!(url.contains("/stations.json?"));
    }

    #[test]
    fn predictions_url_embeds_caller_values_and_fixed_params() {
        let client = NoaaClient::new();
        let url = client.predictions_url("8454000", "20251215", "20251220");

        assert!(url.contains("station=8454000"));
        assert!(url.contains("begin_date=20251215"));
        assert!(url.contains("end_date=20251220"));

        // Fixed request parameters the panel relies on
        assert!(url.contains("product=predictions"));
        assert!(url.contains("datum=MLLW"));
        assert!(url.contains("units=english"));
        assert!(url.contains("interval=hilo"));
        assert!(url.contains("time_zone=lst_ldt"));
        assert!(url.contains("format=json"));
    }

    #[test]
    fn array_field_returns_records_on_success_shape() {
        let body = json!({
            "stations": [
                { "id": "1", "name": "Station A" },
                { "id": "2", "name": "Station B" },
            ]
        });

        let records = array_field(&body, "stations");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "Station A");
        assert_eq!(records[1]["id"], "2");
    }

    #[test]
    fn array_field_defaults_to_empty() {
        assert!(array_field(&json!({}), "stations").is_empty());
        assert!(array_field(&json!({ "stations": null }), "stations").is_empty());
        assert!(array_field(&json!({ "stations": "x" }), "stations").is_empty());
        assert!(array_field(&json!([1, 2, 3]), "predictions").is_empty());
    }

    #[tokio::test]
    async fn fetchers_swallow_transport_failures() {
        // Port 9 (discard) refuses connections on any sane host, so both
        // requests fail at the transport layer.
        let client = NoaaClient::with_base_urls(
            "http://127.0.0.1:9/mdapi/prod/webapi",
            "http://127.0.0.1:9/api/prod/datagetter",
        );

        let stations = client.stations_in_bounds(&test_bounds()).await;
        assert!(stations.is_empty());

        let predictions = client.tide_predictions("8454000", "20251215", "20251220").await;
        assert!(predictions.is_empty());
    }

    /// Serve exactly one HTTP response on an ephemeral local port and
    /// return the base URL to point the client at.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\n\
                 content-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn stations_fetch_returns_decoded_records_on_success() {
        let base = serve_once(
            "200 OK",
            r#"{"stations":[{"id":"1","name":"Station A"},{"id":"2","name":"Station B"}]}"#,
        )
        .await;
        let client = NoaaClient::with_base_urls(base, "http://unused.invalid");

        let stations = client.stations_in_bounds(&test_bounds()).await;
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0]["id"], "1");
        assert_eq!(stations[0]["name"], "Station A");
        assert_eq!(stations[1]["name"], "Station B");
    }

    #[tokio::test]
    async fn stations_fetch_swallows_server_errors() {
        let base = serve_once("500 Internal Server Error", "").await;
        let client = NoaaClient::with_base_urls(base, "http://unused.invalid");

        assert!(client.stations_in_bounds(&test_bounds()).await.is_empty());
    }

    #[tokio::test]
    async fn stations_fetch_swallows_undecodable_bodies() {
        let base = serve_once("200 OK", "tide tables, but in prose").await;
        let client = NoaaClient::with_base_urls(base, "http://unused.invalid");

        assert!(client.stations_in_bounds(&test_bounds()).await.is_empty());
    }

    #[tokio::test]
    async fn predictions_fetch_returns_decoded_records_on_success() {
        let base = serve_once(
            "200 OK",
            r#"{"predictions":[{"t":"2025-12-15 08:00","v":"2.5","type":"H"}]}"#,
        )
        .await;
        let client = NoaaClient::with_base_urls("http://unused.invalid", base);

        let predictions = client.tide_predictions("8454000", "20251215", "20251220").await;
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0]["v"], "2.5");
    }

    #[tokio::test]
    async fn predictions_fetch_swallows_not_found_status() {
        let base = serve_once("404 Not Found", "").await;
        let client = NoaaClient::with_base_urls("http://unused.invalid", base);

        assert!(client
            .tide_predictions("invalid", "20251215", "20251220")
            .await
            .is_empty());
    }
}
