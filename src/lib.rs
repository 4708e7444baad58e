pub mod api;
pub mod config;
pub mod forecast;
#[cfg(feature = "ml")]
pub mod predictor;
pub mod telemetry;
