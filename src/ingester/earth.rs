//! NASA POWER adapter for surface weather
//!
//! The daily point endpoint returns one map per parameter, keyed by
//! `YYYYMMDD`, with `-999` standing in for days that have no observation:
//!
//! ```text
//! { "geometry": { "coordinates": [lon, lat, elevation] },
//!   "properties": { "parameter": { "T2M": { "20240101": 12.3, ... }, ... } } }
//! ```

use super::{DateWindow, HISTORY_LEN};
use crate::client::{FeedTransport, Query};
use crate::config::EarthFeedConfig;
use crate::error::{FeedError, Result};
use crate::forecast::{self, weekday_label, FORECAST_HORIZON};
use crate::types::{ChartDataPoint, ConditionCategory, Coordinates, EarthObservation};
use chrono::NaiveDate;
use rand::Rng;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// POWER's marker for a missing daily value
pub const MISSING_VALUE: f64 = -999.0;

/// Requested POWER parameters: temperature at 2 m, wind at 10 m, humidity at 2 m
pub const PARAMETERS: &str = "T2M,WS10M,RH2M";

#[derive(Debug, Deserialize)]
struct PowerResponse {
    geometry: Option<PowerGeometry>,
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerGeometry {
    coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: PowerParameters,
}

#[derive(Debug, Deserialize)]
struct PowerParameters {
    #[serde(rename = "T2M")]
    temperature: BTreeMap<String, Option<f64>>,
    #[serde(rename = "WS10M")]
    wind_speed: BTreeMap<String, Option<f64>>,
    #[serde(rename = "RH2M")]
    humidity: BTreeMap<String, Option<f64>>,
}

/// One parameter's readings by day; `None` where upstream had no observation
pub type DailySeries = BTreeMap<NaiveDate, Option<f64>>;

/// Validated POWER payload, sentinels already masked
#[derive(Debug, Clone, PartialEq)]
pub struct EarthReading {
    pub location: String,
    pub temperature: DailySeries,
    pub wind_speed: DailySeries,
    pub humidity: DailySeries,
}

/// Surface weather adapter
pub struct EarthAdapter {
    transport: Arc<dyn FeedTransport>,
    config: EarthFeedConfig,
}

impl EarthAdapter {
    pub fn new(transport: Arc<dyn FeedTransport>, config: EarthFeedConfig) -> Self {
        Self { transport, config }
    }

    /// Build the date-ranged point query
    pub fn query(&self, coords: Coordinates, window: &DateWindow) -> Query {
        vec![
            ("start".to_string(), window.start.format("%Y%m%d").to_string()),
            ("end".to_string(), window.today.format("%Y%m%d").to_string()),
            ("latitude".to_string(), coords.latitude.to_string()),
            ("longitude".to_string(), coords.longitude.to_string()),
            ("community".to_string(), self.config.community.clone()),
            ("parameters".to_string(), PARAMETERS.to_string()),
            ("format".to_string(), "JSON".to_string()),
        ]
    }

    /// Fetch and validate the trailing window for a point
    pub async fn fetch(&self, coords: Coordinates, window: &DateWindow) -> Result<EarthReading> {
        let query = self.query(coords, window);
        debug!(
            "Requesting POWER {} for {}..{} at {}, {}",
            PARAMETERS, window.start, window.today, coords.latitude, coords.longitude
        );

        let body = self.transport.get_json(&self.config.base_url, &query).await?;
        let reading = parse_power(body, coords)?;

        debug!("POWER returned {} days", reading.temperature.len());
        Ok(reading)
    }
}

/// Validate a POWER body and mask its sentinels
pub fn parse_power(body: serde_json::Value, coords: Coordinates) -> Result<EarthReading> {
    let resp: PowerResponse = serde_json::from_value(body)
        .map_err(|e| FeedError::Schema(format!("Invalid Earth data structure from POWER: {}", e)))?;

    let location = match resp.geometry {
        Some(geometry) if !geometry.coordinates.is_empty() => geometry
            .coordinates
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        _ => format!("{}, {}", coords.latitude, coords.longitude),
    };

    let params = resp.properties.parameter;
    Ok(EarthReading {
        location,
        temperature: mask_series("T2M", params.temperature)?,
        wind_speed: mask_series("WS10M", params.wind_speed)?,
        humidity: mask_series("RH2M", params.humidity)?,
    })
}

fn mask_series(name: &str, raw: BTreeMap<String, Option<f64>>) -> Result<DailySeries> {
    raw.into_iter()
        .map(|(key, value)| {
            let date = NaiveDate::parse_from_str(&key, "%Y%m%d").map_err(|_| {
                FeedError::Schema(format!("{} has a malformed date key {:?}", name, key))
            })?;
            Ok((date, mask_sentinel(value)))
        })
        .collect()
}

/// Map the `-999` sentinel (and JSON null) to an absent reading
pub fn mask_sentinel(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != MISSING_VALUE && v.is_finite())
}

/// Most recent present reading in a series
pub fn latest_value(series: &DailySeries) -> Option<f64> {
    series.values().rev().find_map(|v| *v)
}

impl EarthReading {
    /// Derive the snapshot, history and forecast.
    ///
    /// Fails with `DataUnavailable` if any parameter has no reading at all
    /// in the window.
    pub fn into_observation<R: Rng + ?Sized>(
        self,
        window: &DateWindow,
        rng: &mut R,
    ) -> Result<EarthObservation> {
        let current = |name: &str, series: &DailySeries| {
            latest_value(series).ok_or_else(|| {
                FeedError::DataUnavailable(format!("{} has no valid readings in the window", name))
            })
        };
        let temperature = current("T2M", &self.temperature)?;
        let wind_speed = current("WS10M", &self.wind_speed)?;
        let humidity = current("RH2M", &self.humidity)?;

        let days = window.chart_days();
        debug_assert_eq!(days.len(), HISTORY_LEN);

        Ok(EarthObservation {
            location: self.location,
            temperature: temperature.round(),
            wind_speed: wind_speed.round(),
            humidity: humidity.round(),
            condition: ConditionCategory::classify(temperature),
            forecast: forecast::earth_forecast(temperature, window.today, FORECAST_HORIZON, rng),
            historical_temp: history(&days, &self.temperature),
            historical_wind: history(&days, &self.wind_speed),
            historical_humidity: history(&days, &self.humidity),
        })
    }
}

/// One point per charted day; days missing from the payload are absent
fn history(days: &[NaiveDate], series: &DailySeries) -> Vec<ChartDataPoint> {
    days.iter()
        .map(|day| ChartDataPoint::new(weekday_label(*day), series.get(day).copied().flatten()))
        .collect()
}
