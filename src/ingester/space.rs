//! NASA DONKI adapter for space weather
//!
//! Two event feeds are queried over the same window:
//! - `/CME`: coronal mass ejections, one record per event with a `startTime`
//! - `/GST`: geomagnetic storms, each carrying `allKpIndex[]` observations
//!
//! Events are bucketed by UTC calendar day. Days without events count as
//! zero, which is a real observation here rather than a gap.

use super::DateWindow;
use crate::client::{FeedTransport, Query};
use crate::config::SpaceFeedConfig;
use crate::error::{FeedError, Result};
use crate::forecast::{self, clamp_kp, solar_wind_from_kp, weekday_label, FORECAST_HORIZON};
use crate::types::{ChartDataPoint, SpaceObservation};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rand::Rng;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CmeEvent {
    start_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GstEvent {
    #[serde(default)]
    all_kp_index: Option<Vec<KpObservation>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KpObservation {
    observed_time: String,
    kp_index: f64,
}

/// Validated DONKI payloads, aggregated per day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpaceReading {
    /// CME events started on each day
    pub daily_cme_count: BTreeMap<NaiveDate, u32>,
    /// Highest Kp observed on each day
    pub daily_max_kp: BTreeMap<NaiveDate, f64>,
}

/// Space weather adapter
pub struct SpaceAdapter {
    transport: Arc<dyn FeedTransport>,
    config: SpaceFeedConfig,
}

impl SpaceAdapter {
    pub fn new(transport: Arc<dyn FeedTransport>, config: SpaceFeedConfig) -> Self {
        Self { transport, config }
    }

    pub fn query(&self, window: &DateWindow) -> Query {
        vec![
            ("startDate".to_string(), window.start.format("%Y-%m-%d").to_string()),
            ("endDate".to_string(), window.today.format("%Y-%m-%d").to_string()),
            ("api_key".to_string(), self.config.api_key.clone()),
        ]
    }

    fn endpoint(&self, feed: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), feed)
    }

    /// Query both event feeds concurrently; both must succeed
    pub async fn fetch(&self, window: &DateWindow) -> Result<SpaceReading> {
        let query = self.query(window);
        let cme_url = self.endpoint("CME");
        let gst_url = self.endpoint("GST");
        debug!("Requesting DONKI CME and GST for {}..{}", window.start, window.today);

        let (cme, gst) = tokio::join!(
            self.transport.get_json(&cme_url, &query),
            self.transport.get_json(&gst_url, &query),
        );

        let reading = parse_donki(cme?, gst?)?;
        debug!(
            "DONKI returned CMEs on {} days, Kp on {} days",
            reading.daily_cme_count.len(),
            reading.daily_max_kp.len()
        );
        Ok(reading)
    }
}

/// Validate both event arrays and bucket them by day
pub fn parse_donki(cme: serde_json::Value, gst: serde_json::Value) -> Result<SpaceReading> {
    let cme_events: Vec<CmeEvent> = serde_json::from_value(cme)
        .map_err(|e| FeedError::Schema(format!("Invalid CME data structure from DONKI: {}", e)))?;
    let gst_events: Vec<GstEvent> = serde_json::from_value(gst)
        .map_err(|e| FeedError::Schema(format!("Invalid GST data structure from DONKI: {}", e)))?;

    let mut reading = SpaceReading::default();

    for event in &cme_events {
        let day = event_day(&event.start_time)?;
        *reading.daily_cme_count.entry(day).or_insert(0) += 1;
    }

    for observation in gst_events
        .iter()
        .flat_map(|event| event.all_kp_index.iter().flatten())
    {
        let day = event_day(&observation.observed_time)?;
        let kp = clamp_kp(observation.kp_index);
        let max = reading.daily_max_kp.entry(day).or_insert(0.0);
        *max = max.max(kp);
    }

    Ok(reading)
}

/// UTC calendar day of a DONKI timestamp (`2024-01-01T10:00Z` or RFC 3339)
pub fn event_day(timestamp: &str) -> Result<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }

    ["%Y-%m-%dT%H:%MZ", "%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S%.fZ"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| FeedError::Schema(format!("Unparseable DONKI timestamp {:?}", timestamp)))
}

impl SpaceReading {
    /// Derive the snapshot, history and forecast
    pub fn into_observation<R: Rng + ?Sized>(
        self,
        window: &DateWindow,
        rng: &mut R,
    ) -> SpaceObservation {
        let days = window.chart_days();

        let historical_cme_count: Vec<ChartDataPoint> = days
            .iter()
            .map(|day| {
                let count = self.daily_cme_count.get(day).copied().unwrap_or(0);
                ChartDataPoint::observed(weekday_label(*day), f64::from(count))
            })
            .collect();

        let historical_kp_index: Vec<ChartDataPoint> = days
            .iter()
            .map(|day| {
                let kp = self.daily_max_kp.get(day).copied().unwrap_or(0.0);
                ChartDataPoint::observed(weekday_label(*day), kp)
            })
            .collect();

        // Each day draws its own perturbation
        let historical_solar_wind: Vec<ChartDataPoint> = historical_kp_index
            .iter()
            .map(|point| ChartDataPoint {
                time: point.time.clone(),
                value: point.value.map(|kp| solar_wind_from_kp(kp, rng)),
            })
            .collect();

        let kp_index = historical_kp_index
            .iter()
            .rev()
            .find_map(|point| point.value)
            .unwrap_or(0.0);

        // Oldest slot, not the latest
        let cme_count = historical_cme_count
            .iter()
            .find_map(|point| point.value)
            .map(|count| count as u32)
            .unwrap_or(0);

        SpaceObservation {
            solar_wind_speed: solar_wind_from_kp(kp_index, rng).round(),
            kp_index,
            cme_count,
            forecast: forecast::space_forecast(kp_index, window.today, FORECAST_HORIZON, rng),
            historical_solar_wind,
            historical_kp_index,
            historical_cme_count,
        }
    }
}
