//! Synthetic dataset used when live retrieval fails
//!
//! Shape matches live output exactly (same lengths, same weekday labels);
//! only the values are made up around fixed baselines.

use crate::forecast::{forecast_days, FORECAST_HORIZON};
use crate::ingester::DateWindow;
use crate::types::{
    ChartDataPoint, CombinedWeather, ConditionCategory, EarthForecast, EarthObservation,
    SpaceForecast, SpaceObservation,
};
use chrono::NaiveDate;
use rand::Rng;

pub const MOCK_LOCATION: &str = "Mock Station";

/// Generate a complete fallback dataset for `today`
pub fn generate<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> CombinedWeather {
    CombinedWeather {
        earth: mock_earth(today, rng),
        space: mock_space(today, rng),
    }
}

/// `base + U[0, spread)` for each charted day
fn series<R: Rng + ?Sized>(
    labels: &[String],
    rng: &mut R,
    value: impl Fn(&mut R) -> f64,
) -> Vec<ChartDataPoint> {
    labels
        .iter()
        .map(|label| ChartDataPoint::observed(label.clone(), value(rng)))
        .collect()
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, base: f64, spread: f64) -> f64 {
    base + rng.random_range(0.0..spread)
}

pub fn mock_earth<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> EarthObservation {
    let labels = DateWindow::trailing(today).chart_labels();

    let forecast = forecast_days(today, FORECAST_HORIZON)
        .into_iter()
        .map(|day| EarthForecast {
            day,
            temperature: uniform(rng, 18.0, 5.0).round(),
            condition: ConditionCategory::Mild,
        })
        .collect();

    EarthObservation {
        location: MOCK_LOCATION.to_string(),
        temperature: 23.0,
        wind_speed: 15.0,
        humidity: 60.0,
        condition: ConditionCategory::Warm,
        forecast,
        historical_temp: series(&labels, rng, |r| uniform(r, 20.0, 5.0)),
        historical_wind: series(&labels, rng, |r| uniform(r, 12.0, 5.0)),
        historical_humidity: series(&labels, rng, |r| uniform(r, 55.0, 10.0)),
    }
}

pub fn mock_space<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> SpaceObservation {
    let labels = DateWindow::trailing(today).chart_labels();

    let forecast = forecast_days(today, FORECAST_HORIZON)
        .into_iter()
        .map(|day| SpaceForecast {
            day,
            solar_wind_speed: uniform(rng, 400.0, 100.0).round(),
            kp_index: uniform(rng, 0.0, 5.0).floor(),
        })
        .collect();

    SpaceObservation {
        solar_wind_speed: 450.0,
        kp_index: 3.0,
        cme_count: 2,
        forecast,
        historical_solar_wind: series(&labels, rng, |r| uniform(r, 420.0, 50.0)),
        historical_kp_index: series(&labels, rng, |r| uniform(r, 0.0, 4.0).floor()),
        historical_cme_count: series(&labels, rng, |r| uniform(r, 0.0, 3.0).floor()),
    }
}
