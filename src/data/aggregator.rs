//! Earth + space aggregation with all-or-nothing fallback
//!
//! Both feeds are fetched concurrently and the join waits for both to
//! settle. If anything fails on either side, both halves are replaced with
//! the fallback dataset; a live half is never mixed with a synthetic one.

use super::fallback;
use crate::client::{FeedTransport, HttpTransport};
use crate::config::Config;
use crate::error::Result;
use crate::ingester::{DateWindow, EarthAdapter, EarthReading, SpaceAdapter, SpaceReading};
use crate::types::{CombinedWeather, Coordinates};
use chrono::{Local, NaiveDate};
use rand::Rng;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Raw outcome of one retrieval round
pub type Readings = Result<(EarthReading, SpaceReading)>;

/// Weather retrieval entry point
pub struct WeatherService {
    earth: EarthAdapter,
    space: SpaceAdapter,
}

impl WeatherService {
    /// Create a service over any transport
    pub fn new(transport: Arc<dyn FeedTransport>, config: &Config) -> Self {
        Self {
            earth: EarthAdapter::new(transport.clone(), config.earth.clone()),
            space: SpaceAdapter::new(transport, config.space.clone()),
        }
    }

    /// Create a service talking HTTP to the configured endpoints
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.http)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Fetch both feeds concurrently and wait for both to settle.
    ///
    /// The Earth failure wins when both sides fail.
    pub async fn fetch_readings(&self, coords: Coordinates, window: &DateWindow) -> Readings {
        let (earth, space) = tokio::join!(self.earth.fetch(coords, window), self.space.fetch(window));
        Ok((earth?, space?))
    }

    /// Turn a retrieval round into the dashboard model, failing on any error
    pub fn assemble<R: Rng + ?Sized>(
        readings: Readings,
        window: &DateWindow,
        rng: &mut R,
    ) -> Result<CombinedWeather> {
        let (earth, space) = readings?;
        let earth = earth.into_observation(window, rng)?;
        let space = space.into_observation(window, rng);
        Ok(CombinedWeather { earth, space })
    }

    /// Like `assemble`, but any failure yields the fallback dataset for both halves
    pub fn resolve<R: Rng + ?Sized>(
        readings: Readings,
        window: &DateWindow,
        rng: &mut R,
    ) -> CombinedWeather {
        match Self::assemble(readings, window, rng) {
            Ok(weather) => weather,
            Err(e) => {
                error!("Error fetching live weather data: {}", e);
                warn!("Falling back to mock data");
                fallback::generate(window.today, rng)
            }
        }
    }

    /// Live data only; surfaces the first failure instead of falling back
    pub async fn fetch_live<R: Rng + ?Sized>(
        &self,
        coords: Coordinates,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<CombinedWeather> {
        let window = DateWindow::trailing(today);
        let readings = self.fetch_readings(coords, &window).await;
        Self::assemble(readings, &window, rng)
    }

    /// Dashboard entry point. Never fails: live data when both feeds work,
    /// the fallback dataset otherwise.
    pub async fn fetch_weather<R: Rng + ?Sized>(
        &self,
        coords: Coordinates,
        today: NaiveDate,
        rng: &mut R,
    ) -> CombinedWeather {
        info!(
            "Fetching weather for {}, {} as of {}",
            coords.latitude, coords.longitude, today
        );
        let window = DateWindow::trailing(today);
        let readings = self.fetch_readings(coords, &window).await;
        Self::resolve(readings, &window, rng)
    }

    /// `fetch_weather` against the local calendar day and the thread RNG
    pub async fn fetch_weather_now(&self, coords: Coordinates) -> CombinedWeather {
        let today = Local::now().date_naive();
        let window = DateWindow::trailing(today);
        let readings = self.fetch_readings(coords, &window).await;
        Self::resolve(readings, &window, &mut rand::rng())
    }
}
