//! Dashboard-side derivations over a `CombinedWeather`
//!
//! Pure functions the view layer consumes directly: Kp severity bands for
//! coloring, the peak forecast day, and chart rows pairing the two feeds.


use crate::types::{ChartDataPoint, CombinedWeather, SpaceForecast, SpaceObservation};
use serde::{Deserialize, Serialize};

/// Geomagnetic activity band used for coloring Kp values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpSeverity {
    /// Kp <= 3
    Calm,
    /// Kp <= 4
    Unsettled,
    /// Kp <= 6
    Storm,
    Severe,
}

impl KpSeverity {
    pub fn from_kp(kp: f64) -> Self {
        if kp <= 3.0 {
            KpSeverity::Calm
        } else if kp <= 4.0 {
            KpSeverity::Unsettled
        } else if kp <= 6.0 {
            KpSeverity::Storm
        } else {
            KpSeverity::Severe
        }
    }

    /// Display color as `#rrggbb`
    pub fn color(&self) -> &'static str {
        match self {
            KpSeverity::Calm => "#33FFD1",
            KpSeverity::Unsettled => "#eab308",
            KpSeverity::Storm => "#FF6B00",
            KpSeverity::Severe => "#ef4444",
        }
    }
}

impl std::fmt::Display for KpSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KpSeverity::Calm => write!(f, "calm"),
            KpSeverity::Unsettled => write!(f, "unsettled"),
            KpSeverity::Storm => write!(f, "storm"),
            KpSeverity::Severe => write!(f, "severe storm"),
        }
    }
}

/// First forecast day with the highest Kp; ties keep the earliest day
pub fn peak_kp_forecast(forecast: &[SpaceForecast]) -> Option<&SpaceForecast> {
    let mut days = forecast.iter();
    let first = days.next()?;
    Some(days.fold(first, |max, day| {
        if day.kp_index > max.kp_index {
            day
        } else {
            max
        }
    }))
}

/// One x-axis slot pairing an Earth series with the solar wind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub time: String,
    pub earth: Option<f64>,
    pub solar_wind: Option<f64>,
}

/// CME count and max Kp for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeomagneticRow {
    pub time: String,
    pub cme_count: f64,
    pub max_kp: f64,
}

/// Pair an Earth history with the solar wind history by position.
/// Absent Earth readings stay absent.
pub fn compare_with_solar_wind(
    earth: &[ChartDataPoint],
    space: &SpaceObservation,
) -> Vec<ComparisonRow> {
    earth
        .iter()
        .enumerate()
        .map(|(i, point)| ComparisonRow {
            time: point.time.clone(),
            earth: point.value,
            solar_wind: space.historical_solar_wind.get(i).and_then(|p| p.value),
        })
        .collect()
}

pub fn temperature_vs_solar_wind(weather: &CombinedWeather) -> Vec<ComparisonRow> {
    compare_with_solar_wind(&weather.earth.historical_temp, &weather.space)
}

pub fn wind_vs_solar_wind(weather: &CombinedWeather) -> Vec<ComparisonRow> {
    compare_with_solar_wind(&weather.earth.historical_wind, &weather.space)
}

/// CME counts alongside daily max Kp, in chart order
pub fn geomagnetic_rows(space: &SpaceObservation) -> Vec<GeomagneticRow> {
    space
        .historical_cme_count
        .iter()
        .zip(&space.historical_kp_index)
        .map(|(cme, kp)| GeomagneticRow {
            time: cme.time.clone(),
            cme_count: cme.value.unwrap_or(0.0),
            max_kp: kp.value.unwrap_or(0.0),
        })
        .collect()
}
