//! Aggregation of the two feeds into the dashboard model
//!
//! - `aggregator`: concurrent retrieval and the fallback policy
//! - `fallback`: synthetic dataset with the live shape

pub mod aggregator;
pub mod fallback;

#[cfg(test)]
mod tests;

pub use aggregator::WeatherService;
