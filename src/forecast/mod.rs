//! Forward forecast synthesis
//!
//! Not a model: each forecast day is the last known value plus a bounded,
//! uniformly drawn perturbation. Structure (length, weekday labels) is
//! deterministic; values are stochastic but confined to fixed ranges.
//!
//! The random source is always passed in, so a seeded `StdRng` makes every
//! output reproducible.


use crate::types::{ConditionCategory, EarthForecast, SpaceForecast};
use chrono::{Duration, NaiveDate};
use rand::Rng;

/// Number of forecast days produced for each feed
pub const FORECAST_HORIZON: usize = 7;

/// Half-width of the temperature perturbation (°C)
pub const TEMPERATURE_SPREAD: f64 = 2.0;
/// Half-width of the Kp-index perturbation
pub const KP_SPREAD: f64 = 1.0;
/// Half-width of the solar wind perturbation (km/s)
pub const SOLAR_WIND_SPREAD: f64 = 25.0;

/// Quiet-sun solar wind baseline (km/s)
pub const SOLAR_WIND_BASE: f64 = 400.0;
/// Solar wind added per Kp unit (km/s)
pub const SOLAR_WIND_PER_KP: f64 = 50.0;

pub const KP_MIN: f64 = 0.0;
pub const KP_MAX: f64 = 9.0;

/// Uniform draw from `[-half_width, half_width]`
pub fn perturbation<R: Rng + ?Sized>(rng: &mut R, half_width: f64) -> f64 {
    rng.random_range(-half_width..=half_width)
}

/// Three-letter weekday abbreviation ("Mon", "Tue", ...)
pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Labels for the `horizon` days after `today`
pub fn forecast_days(today: NaiveDate, horizon: usize) -> Vec<String> {
    (1..=horizon as i64)
        .map(|offset| weekday_label(today + Duration::days(offset)))
        .collect()
}

pub fn clamp_kp(kp: f64) -> f64 {
    kp.clamp(KP_MIN, KP_MAX)
}

/// Proxy solar wind speed for a Kp value: `400 + kp * 50 + U[-25, 25]`
pub fn solar_wind_from_kp<R: Rng + ?Sized>(kp: f64, rng: &mut R) -> f64 {
    SOLAR_WIND_BASE + kp * SOLAR_WIND_PER_KP + perturbation(rng, SOLAR_WIND_SPREAD)
}

/// Next-day Kp: `round(max(0, kp + U[-1, 1]))`, kept on the 0-9 scale
pub fn forecast_kp<R: Rng + ?Sized>(current_kp: f64, rng: &mut R) -> f64 {
    let drifted = (current_kp + perturbation(rng, KP_SPREAD)).max(KP_MIN);
    clamp_kp(drifted.round())
}

/// Surface forecast from the current temperature.
///
/// Forecast days only distinguish warm from not-warm; cold days are
/// reported as mild.
pub fn earth_forecast<R: Rng + ?Sized>(
    current_temperature: f64,
    today: NaiveDate,
    horizon: usize,
    rng: &mut R,
) -> Vec<EarthForecast> {
    forecast_days(today, horizon)
        .into_iter()
        .map(|day| {
            let temperature = current_temperature + perturbation(rng, TEMPERATURE_SPREAD);
            EarthForecast {
                day,
                temperature: temperature.round(),
                condition: ConditionCategory::classify_forecast(temperature),
            }
        })
        .collect()
}

/// Space forecast from the current Kp-index
pub fn space_forecast<R: Rng + ?Sized>(
    current_kp: f64,
    today: NaiveDate,
    horizon: usize,
    rng: &mut R,
) -> Vec<SpaceForecast> {
    forecast_days(today, horizon)
        .into_iter()
        .map(|day| {
            let kp_index = forecast_kp(current_kp, rng);
            SpaceForecast {
                day,
                solar_wind_speed: solar_wind_from_kp(kp_index, rng).round(),
                kp_index,
            }
        })
        .collect()
}
