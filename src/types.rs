//! Core data model shared by the adapters, the synthesizer and the dashboard

use serde::{Deserialize, Serialize};

/// Geographic point passed through to the Earth feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One chart sample. `value` is `None` where the upstream reported no observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub time: String,
    pub value: Option<f64>,
}

impl ChartDataPoint {
    pub fn new(time: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }

    pub fn observed(time: impl Into<String>, value: f64) -> Self {
        Self::new(time, Some(value))
    }

    pub fn absent(time: impl Into<String>) -> Self {
        Self::new(time, None)
    }
}

/// Surface condition category. The view layer picks the concrete icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionCategory {
    /// Above 25 °C
    Warm,
    /// 10 °C to 25 °C inclusive
    Mild,
    /// Below 10 °C
    Cold,
}

impl ConditionCategory {
    pub const WARM_ABOVE: f64 = 25.0;
    pub const COLD_BELOW: f64 = 10.0;

    /// Three-way classification used for the current snapshot
    pub fn classify(temperature: f64) -> Self {
        if temperature > Self::WARM_ABOVE {
            ConditionCategory::Warm
        } else if temperature < Self::COLD_BELOW {
            ConditionCategory::Cold
        } else {
            ConditionCategory::Mild
        }
    }

    /// Two-way classification used for forecast days: warm or not
    pub fn classify_forecast(temperature: f64) -> Self {
        if temperature > Self::WARM_ABOVE {
            ConditionCategory::Warm
        } else {
            ConditionCategory::Mild
        }
    }

    /// Human-readable condition label
    pub fn label(&self) -> &'static str {
        match self {
            ConditionCategory::Warm => "Sunny",
            ConditionCategory::Mild => "Partly Cloudy",
            ConditionCategory::Cold => "Cloudy",
        }
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One forecast day for the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthForecast {
    /// Weekday abbreviation, e.g. "Mon"
    pub day: String,
    /// Whole degrees Celsius
    pub temperature: f64,
    pub condition: ConditionCategory,
}

/// Current surface snapshot plus trailing history and forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthObservation {
    pub location: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Metres per second at 10 m
    pub wind_speed: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    pub condition: ConditionCategory,
    pub forecast: Vec<EarthForecast>,
    pub historical_temp: Vec<ChartDataPoint>,
    pub historical_wind: Vec<ChartDataPoint>,
    pub historical_humidity: Vec<ChartDataPoint>,
}

/// One forecast day for space weather
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceForecast {
    pub day: String,
    /// km/s
    pub solar_wind_speed: f64,
    pub kp_index: f64,
}

/// Current space-weather snapshot plus trailing history and forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceObservation {
    /// km/s
    pub solar_wind_speed: f64,
    /// 0-9
    pub kp_index: f64,
    pub cme_count: u32,
    pub forecast: Vec<SpaceForecast>,
    pub historical_solar_wind: Vec<ChartDataPoint>,
    pub historical_kp_index: Vec<ChartDataPoint>,
    pub historical_cme_count: Vec<ChartDataPoint>,
}

/// The dashboard model: both halves always come from the same source (live or fallback)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedWeather {
    pub earth: EarthObservation,
    pub space: SpaceObservation,
}
