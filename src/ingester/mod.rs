//! Observation ingestion from the upstream feeds
//!
//! Collects raw observations from:
//! - NASA POWER (surface temperature, wind, humidity)
//! - NASA DONKI (coronal mass ejections, geomagnetic storms)
//!
//! Each adapter splits into an async `fetch` that performs I/O and shape
//! validation, and a synchronous `into_observation` that applies the
//! derivation rules with an injected random source.

pub mod earth;
pub mod space;


pub use earth::{EarthAdapter, EarthReading};
pub use space::{SpaceAdapter, SpaceReading};

use crate::forecast::weekday_label;
use chrono::{Duration, NaiveDate};

/// Number of days in every historical series
pub const HISTORY_LEN: usize = 7;

/// Trailing date window ending on a caller-supplied reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First day requested from upstream (inclusive)
    pub start: NaiveDate,
    /// Reference day, last day requested (inclusive)
    pub today: NaiveDate,
}

impl DateWindow {
    /// Window requested upstream: `today - 7 ..= today`
    pub fn trailing(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(HISTORY_LEN as i64),
            today,
        }
    }

    /// The charted days, oldest first: `today - 6 ..= today`
    pub fn chart_days(&self) -> Vec<NaiveDate> {
        (0..HISTORY_LEN as i64)
            .rev()
            .map(|back| self.today - Duration::days(back))
            .collect()
    }

    /// Weekday labels for `chart_days`
    pub fn chart_labels(&self) -> Vec<String> {
        self.chart_days().into_iter().map(weekday_label).collect()
    }
}
