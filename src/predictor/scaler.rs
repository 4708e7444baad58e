//! Min-max scaler mapping raw demand (MW) to the model's normalized space.
//!
//! The fitted parameters are exported at training time as a small JSON
//! document alongside the ONNX graph.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::forecast::ForecastError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub data_min: f64,
    pub data_max: f64,
}

impl MinMaxScaler {
    pub fn load(path: &Path) -> Result<Self, ForecastError> {
        let raw = std::fs::read(path).map_err(|e| {
            ForecastError::ArtifactUnavailable(format!("{}: {e}", path.display()))
        })?;
        serde_json::from_slice(&raw).map_err(|e| {
            ForecastError::ArtifactUnavailable(format!("{}: {e}", path.display()))
        })
    }

    /// Map a raw value into the model's normalized input space.
    pub fn transform(&self, value: f64) -> f64 {
        let range = self.data_max - self.data_min;
        if range.abs() < 1e-10 {
            return 0.5; // Degenerate fit, avoid division by zero
        }
        (value - self.data_min) / range
    }

    /// Map a model output back to physical units.
    pub fn inverse_transform(&self, value: f64) -> f64 {
        value * (self.data_max - self.data_min) + self.data_min
    }
}
