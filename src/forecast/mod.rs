pub mod placeholder;
pub mod series;

pub use placeholder::*;
pub use series::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Demand assumed when the request carries no usable last-known value (MW).
pub const DEFAULT_LAST_DEMAND: f64 = 60000.0;

/// Predicted demand above this is flagged as peak load (MW).
pub const PEAK_LOAD_THRESHOLD_MW: f64 = 65000.0;

pub const SERIES_LEN: usize = 24;

/// Why the real prediction path could not produce a series.
///
/// Every kind degrades uniformly to the placeholder series at the route
/// handler; the message survives into the status highlight.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("model artifact unavailable: {0}")]
    ArtifactUnavailable(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

/// One hour of forecasted demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// "HH:00" label, index = hour of day.
    pub hour: String,
    /// Forecasted demand in MW.
    pub demand: f64,
}

pub fn hour_label(hour: usize) -> String {
    format!("{hour:02}:00")
}

/// Sine phase for a given hour of the 24-hour cycle.
pub(crate) fn daily_phase(hour: usize) -> f64 {
    (hour as f64 / SERIES_LEN as f64) * std::f64::consts::TAU
}

/// First maximal point under natural 0..23 iteration order.
pub fn peak_point(series: &[SeriesPoint]) -> &SeriesPoint {
    series
        .iter()
        .reduce(|best, p| if p.demand > best.demand { p } else { best })
        .expect("series is never empty")
}

/// First minimal point under natural 0..23 iteration order.
pub fn low_point(series: &[SeriesPoint]) -> &SeriesPoint {
    series
        .iter()
        .reduce(|best, p| if p.demand < best.demand { p } else { best })
        .expect("series is never empty")
}
