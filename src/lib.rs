//! Cosmic Forecast
//!
//! Fetches surface weather (NASA POWER) and space weather (NASA DONKI),
//! normalizes both into chart-ready series, and synthesizes 7-day forecasts.
//! Any upstream failure degrades to a synthetic dataset of the same shape.

pub mod analysis;
pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod forecast;
pub mod ingester;
pub mod types;


pub use data::WeatherService;
pub use error::{FeedError, Result};
pub use types::{CombinedWeather, Coordinates};
